use navmesh_probe::api::{serve, MockAuth, MockBehavior, MockState, WalkableArea};
use navmesh_probe::{logging, Result, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let settings = Settings::load()?;
    let area = WalkableArea::from_bounds(settings.mock.walkable);
    let auth = match settings.auth.credentials() {
        Some((email, password)) => MockAuth::new(email, password),
        None => MockAuth::default(),
    };
    let listener = TcpListener::bind(settings.mock.bind_addr.as_str()).await?;

    println!("Mock navmesh service");
    println!("Listening on http://{}", listener.local_addr()?);
    println!();
    println!("Endpoints:");
    println!("  POST /spatial/restricttonavmesh");
    println!("  POST /user/login");
    println!("  POST /service/domains-access-token");
    println!("  POST /api/v1/domains/<id>/auth");
    println!("  GET  /health");
    println!();
    println!(
        "Walkable area: x in [{}, {}], z in [{}, {}]",
        area.min_x, area.max_x, area.min_z, area.max_z
    );
    println!("Login as:      {}", auth.email);
    println!();

    let state = MockState::new(MockBehavior::Walkable(area)).with_auth(auth);
    serve(listener, state).await
}
