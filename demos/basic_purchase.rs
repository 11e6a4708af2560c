//! Basic card purchase example against the Payeezy demo environment.
//!
//! This example shows the simplest way to run a signed card purchase
//! through the gateway facade: load a configuration, build a card,
//! submit the payment, and read the decision.
//!
//! # Running this example
//!
//! ```bash
//! cargo run --example basic_purchase
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::str_to_string,
    clippy::uninlined_format_args,
    reason = "examples are allowed to use println and simple formatting"
)]

use firstdata_gateway::instrument::{Card, ContactAddress};
use firstdata_gateway::request::PaymentRequest;
use firstdata_gateway::{GatewayConfig, PayeezyGateway};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("First Data Gateway: Basic Purchase Example\n");

    // Step 1: Load merchant configuration
    // In production, load this from a file with GatewayConfig::from_file
    // and keep the HMAC key out of source control.
    println!("1. Loading merchant configuration...");
    let config = GatewayConfig::from_toml(
        r#"
        gateway_id = "AB1234-01"
        password = "password123"
        key_id = "163440"
        hmac_key = "fakehmackey"
        test_mode = true
        "#,
    )?;
    println!("   ✓ Configuration loaded (demo environment)");

    // Step 2: Create the gateway
    println!("\n2. Creating Payeezy gateway...");
    let gateway = PayeezyGateway::from_config(&config)?;
    println!("   Endpoint: {}", gateway.endpoint_url());
    println!("   API version: v{}", gateway.api_version().number());

    // Step 3: Prepare the card
    println!("\n3. Preparing card details...");
    let mut card = Card {
        number: Some("4111111111111111".to_string()),
        expiry_month: Some(12),
        expiry_year: Some(2030),
        cvv: Some("123".to_string()),
        token: None,
        token_brand: None,
        email: None,
        billing_address: ContactAddress {
            address1: Some("123 Billing St".to_string()),
            city: Some("Billstown".to_string()),
            state: Some("CA".to_string()),
            postcode: Some("12345".to_string()),
            country: Some("US".to_string()),
            ..ContactAddress::default()
        },
        shipping_address: ContactAddress::default(),
    };
    card.set_holder_name("John Doe");
    println!("   Card: 4111 11.. .... 1111 (Visa test number)");
    println!("   Holder: John Doe");

    // Step 4: Build the purchase request
    println!("\n4. Building purchase request...");
    let request = PaymentRequest::purchase(Decimal::new(52_99, 2), card)
        .with_currency("USD")
        .with_transaction_id("order-1001")
        .with_client_ip("203.0.113.9");
    println!("   Amount: 52.99 USD");
    println!("   Merchant reference: order-1001");

    // Step 5: Submit the payment
    println!("\n5. Submitting signed purchase...");
    match gateway.send(&request).await {
        Ok(response) => {
            if response.is_successful() {
                println!("   ✓ Payment approved!");
                println!("\n   Response Details:");
                println!("   - Gateway code: {:?}", response.code());
                println!("   - Bank message: {:?}", response.bank_message());
                println!("   - Reference for refunds: {}", response.transaction_reference());
            } else {
                println!("   ✗ Payment declined");
                println!("   - Gateway code: {:?}", response.code());
                println!("   - Message: {:?}", response.message());
            }
        }
        Err(e) => {
            eprintln!("   ✗ Purchase failed: {}", e);
            eprintln!("\n   This is expected with the placeholder credentials above.");
            eprintln!("   Use the key id and HMAC key from your terminal setup page.");
        }
    }

    println!("\n✓ Example complete");
    Ok(())
}
