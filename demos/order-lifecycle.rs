use std::{env, time::Duration};

use digicert::{
    api::{OrderCertificate, SubmitOrder},
    generate_csr_and_key, Client, Subject,
};
use eyre::WrapErr as _;

const DOMAIN: &str = "testing.com";

fn env_var(name: &str) -> eyre::Result<String> {
    env::var(name).wrap_err_with(|| format!("{name} must be set"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let token = env_var("DIGICERT_API_TOKEN")?;
    let org_id = env_var("DIGICERT_ORG_ID")?
        .parse::<i64>()
        .wrap_err("DIGICERT_ORG_ID must be an integer")?;
    let product_id = env_var("DIGICERT_PRODUCTNAME_ID")?;

    // Set `debug(true)` and `RUST_LOG=digicert::trace=debug` to see every exchange.
    let client = Client::builder(token).build()?;

    // Generate a key and CSR. Keep the key; it is never sent to the API.
    let subject = Subject {
        organization: vec!["myOrg".to_owned()],
        organizational_unit: vec!["Products".to_owned()],
        locality: vec!["San Francisco".to_owned()],
        province: vec!["CA".to_owned()],
        country: vec!["US".to_owned()],
        street_address: vec!["123 Street 1".to_owned()],
        ..Subject::new(format!("cn.{DOMAIN}"))
    };
    let csr = generate_csr_and_key(&subject, &[DOMAIN])?;

    let expires = time::OffsetDateTime::now_utc().date() + time::Duration::days(1);
    let order = SubmitOrder::new(OrderCertificate::from_csr(&csr), org_id, 1)
        .with_custom_expiration(expires);

    let created = client.submit_order(&product_id, &order).await?;
    println!("submitted order {}", created.id);

    // Issuance can take a while, don't poll too aggressively.
    let view = client
        .wait_for_issuance(created.id, 10, Duration::from_secs(12))
        .await?;

    let (true, Some(cert_id)) = (view.is_issued(), view.certificate_id) else {
        println!("certificate was not issued, status: {}", view.status);
        return Ok(());
    };

    let bundle = client.download_certificate(&cert_id).await?;
    println!("downloaded certificate {cert_id} ({} bytes)", bundle.len());

    let revocation = client.revoke_certificate(&cert_id, "Revoke it").await?;
    println!("revocation {}: {}", revocation.id, revocation.status);

    Ok(())
}
