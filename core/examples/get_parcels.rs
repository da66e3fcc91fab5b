//! Fetch parcels scheduled for handoff from the test endpoint and print
//! the result.

use hermes_partner_core::{ClientConfig, PartnerApiClient, TEST_URL};

fn main() {
    tracing_subscriber::fmt().init();

    let config = match ClientConfig::new(TEST_URL, "testlogin", "testpassword") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let client = PartnerApiClient::new(config);

    match client.fetch_parcels("2014-08-12", &[], None) {
        Ok(result) => println!("{result:#?}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
