use navmesh_probe::{
    authorize, probe, verify, Coordinate, NavTarget, NavmeshClient, Result, Settings,
    DEFAULT_TOLERANCE,
};
use navmesh_probe::logging;
use tracing::error;

/// Known-good answer for the reference point below
const EXPECTED: NavTarget = NavTarget {
    x: -6.270300406695041,
    z: 0.6000000413170843,
    yaw: -3.14,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init();

    println!("navmesh-probe - restrict-to-navmesh check\n");

    let settings = match authorize(Settings::load()?).await {
        Ok(settings) => settings,
        Err(e) => {
            error!("Domain authentication failed: {}", e);
            println!("\nFailed to get domain access; verification skipped.");
            return Ok(());
        }
    };
    println!("Endpoint: {}", settings.endpoint);
    println!("Domain:   {} ({})", settings.domain_id, settings.domain_server_url);
    println!("Radius:   {}", settings.radius);
    println!(
        "Token:    {}",
        if settings.access_token.is_some() { "yes" } else { "none" }
    );

    let client = NavmeshClient::new(settings)?;

    let input = Coordinate::new(-6.77, 0.0, 0.60);
    println!("\nTesting with input coordinates: {:?}", input);

    match probe(&client, input).await {
        Some(result) => {
            println!("\nCalculated result: {}", result);
            println!("Facing yaw:        {}", result.facing_yaw());

            let verification = verify(EXPECTED, result, DEFAULT_TOLERANCE);
            println!("\nVerification:");
            println!("{}", verification);
            println!("Match:    {}", if verification.passed() { "yes" } else { "NO" });
        }
        None => println!("\nNo result; verification skipped."),
    }

    Ok(())
}
