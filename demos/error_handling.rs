//! Error handling example showing how to handle different error types.
//!
//! This example demonstrates proper error handling patterns for gateway
//! operations, including configuration errors, validation errors, network
//! errors, and recovery strategies. A declined payment is not an error:
//! it parses into a normal response whose `is_successful()` is false.
//!
//! # Running this example
//!
//! ```bash
//! cargo run --example error_handling
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::str_to_string,
    clippy::uninlined_format_args,
    reason = "examples are allowed to use println and simple formatting"
)]

use firstdata_gateway::instrument::{Card, ContactAddress};
use firstdata_gateway::request::{Operation, PaymentRequest};
use firstdata_gateway::response::PayeezyResponse;
use firstdata_gateway::{GatewayConfig, GatewayError, PayeezyGateway};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("First Data Gateway: Error Handling Example\n");

    // Example 1: Missing HMAC credentials (should fail at construction)
    println!("Example 1: Payeezy gateway without an HMAC key (should fail)");
    let config = GatewayConfig::from_toml(
        r#"
        gateway_id = "AB1234-01"
        password = "password123"
        test_mode = true
        "#,
    )?;

    match PayeezyGateway::from_config(&config) {
        Ok(_) => println!("   Unexpected success"),
        Err(GatewayError::Config(msg)) => {
            println!("   ✓ Caught configuration error: {}", msg);
            println!("   Recovery: Add key_id and hmac_key from terminal setup");
        }
        Err(e) => println!("   Unexpected error: {}", e),
    }

    // A complete configuration for the remaining examples.
    let config = GatewayConfig::from_toml(
        r#"
        gateway_id = "AB1234-01"
        password = "password123"
        key_id = "163440"
        hmac_key = "fakehmackey"
        test_mode = true
        "#,
    )?;
    let gateway = PayeezyGateway::from_config(&config)?;

    // Example 2: Expired card (validation, nothing sent over the wire)
    println!("\nExample 2: Purchase with an expired card (should fail)");
    let card = Card {
        number: Some("4111111111111111".to_string()),
        expiry_month: Some(1),
        expiry_year: Some(2020),
        cvv: None,
        token: None,
        token_brand: None,
        email: None,
        billing_address: ContactAddress::default(),
        shipping_address: ContactAddress::default(),
    };

    let request = PaymentRequest::purchase(Decimal::new(10_00, 2), card);
    match gateway.send(&request).await {
        Ok(_) => println!("   Unexpected success"),
        Err(GatewayError::InvalidCard(msg)) => {
            println!("   ✓ Caught card validation: {}", msg);
            println!("   Recovery: Correct the expiry date and rebuild");
        }
        Err(e) => println!("   Unexpected error: {}", e),
    }

    // Example 3: Missing amount (envelope validation)
    println!("\nExample 3: Purchase without an amount (should fail)");
    let request = PaymentRequest::new(Operation::Purchase);
    match gateway.send(&request).await {
        Ok(_) => println!("   Unexpected success"),
        Err(GatewayError::InvalidRequest(msg)) => {
            println!("   ✓ Caught envelope validation: {}", msg);
            println!("   Recovery: Populate the named parameter and rebuild");
        }
        Err(e) => println!("   Unexpected error: {}", e),
    }

    // Example 4: Live demo endpoint with placeholder credentials
    println!("\nExample 4: Valid request with placeholder credentials");
    let mut card = Card {
        number: Some("4111111111111111".to_string()),
        expiry_month: Some(12),
        expiry_year: Some(2030),
        cvv: Some("123".to_string()),
        token: None,
        token_brand: None,
        email: None,
        billing_address: ContactAddress::default(),
        shipping_address: ContactAddress::default(),
    };
    card.set_holder_name("John Doe");

    let request = PaymentRequest::purchase(Decimal::new(52_99, 2), card)
        .with_currency("USD")
        .with_transaction_id("order-1001");

    match gateway.send(&request).await {
        Ok(response) => {
            println!("   ✓ Gateway answered: approved = {}", response.is_successful());
        }
        Err(GatewayError::InvalidResponse(msg)) => {
            println!("   ✓ Gateway rejected the credentials: {}", msg);
            println!("   Recovery: Use the HMAC key from your terminal setup page");
        }
        Err(GatewayError::Http(e)) => {
            println!("   ✓ Caught network error: {}", e);
            println!("   Recovery strategies:");
            println!("   - Retry with exponential backoff");
            println!("   - Check network connectivity");
            println!("   - Verify the demo endpoint is reachable");
            println!("   - Check firewall/proxy settings");
        }
        Err(e) => println!("   Other error: {}", e),
    }

    // Example 5: Comprehensive error matching
    println!("\nExample 5: Comprehensive error pattern matching");
    let card = Card {
        number: Some("4111111111111111".to_string()),
        expiry_month: None,
        expiry_year: None,
        cvv: None,
        token: None,
        token_brand: None,
        email: None,
        billing_address: ContactAddress::default(),
        shipping_address: ContactAddress::default(),
    };
    let result = gateway.send(&PaymentRequest::purchase(Decimal::new(5_00, 2), card)).await;

    handle_payment_result(result);

    println!("\n✓ Error handling examples complete");
    Ok(())
}

/// Demonstrates comprehensive error handling with recovery guidance.
fn handle_payment_result(result: Result<PayeezyResponse, GatewayError>) {
    match result {
        Ok(response) => {
            println!("   ✓ Gateway answered!");
            println!("   Approved: {}", response.is_successful());
            println!("   Message: {:?}", response.message());
        }

        // Envelope errors - populate the field and retry
        Err(GatewayError::InvalidRequest(msg)) => {
            eprintln!("   ✗ Invalid payment request: {}", msg);
            eprintln!("   → Fix: Populate the named request parameter");
            eprintln!("   → Retry: After rebuilding the request");
        }

        // Instrument errors - fix input and retry
        Err(GatewayError::InvalidCard(msg)) => {
            eprintln!("   ✗ Invalid card details: {}", msg);
            eprintln!("   → Fix: Correct the named card field");
            eprintln!("   → Note: Nothing was sent over the wire");
        }
        Err(GatewayError::InvalidAch(msg)) => {
            eprintln!("   ✗ Invalid ACH details: {}", msg);
            eprintln!("   → Fix: Correct the bank account field");
            eprintln!("   → Note: Routing numbers are ABA checksum-validated");
        }

        // Response errors - check credentials and API version
        Err(GatewayError::InvalidResponse(msg)) => {
            eprintln!("   ✗ Unusable gateway reply: {}", msg);
            eprintln!("   → Fix: Verify key id and HMAC key");
            eprintln!("   → Fix: Verify the configured API version");
        }

        // Configuration errors - fix credentials, never retried
        Err(GatewayError::Config(msg)) => {
            eprintln!("   ✗ Configuration error: {}", msg);
            eprintln!("   → Fix: Correct the merchant credentials");
            eprintln!("   → Note: Raised at construction, never mid-request");
        }

        // Transport rejections - fix the request context
        Err(GatewayError::Transport(msg)) => {
            eprintln!("   ✗ Transport rejected the request: {}", msg);
            eprintln!("   → Fix: Endpoints must be HTTPS and non-loopback");
        }

        // Network errors - retry with backoff
        Err(GatewayError::Http(e)) => {
            eprintln!("   ✗ Network error: {}", e);
            eprintln!("   → Fix: Check network connectivity");
            eprintln!("   → Retry: Use exponential backoff strategy");
            eprintln!("   → Timeout: Default is 30 seconds");
        }
    }
}
