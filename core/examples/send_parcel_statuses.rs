//! Submit one parcel status update to the test endpoint and print the
//! result.

use std::collections::HashMap;

use hermes_partner_core::{
    ClientConfig, ParcelStatus, ParcelStatusRecord, PartnerApiClient, StatusSystemName, TEST_URL,
};

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

    let records = vec![ParcelStatusRecord {
        parcel_barcode: "21750100012392".to_string(),
        statuses: ParcelStatus {
            status_system_name: StatusSystemName::Missing,
            status_timestamp: "2024-01-01T00:00:00+00:00".to_string(),
            partner_point_code: "soPS2".to_string(),
            extra_params: HashMap::from([
                ("Name1".to_string(), "Value1".to_string()),
                ("Name2".to_string(), "Value2".to_string()),
            ]),
        },
    }];

    match client.submit_parcel_statuses(&records) {
        Ok(result) => println!("{result:#?}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
