//! Direct GGe4 header signing example.
//!
//! This example demonstrates low-level request signing without using
//! the gateway facade. Useful for custom HTTP stacks that only need
//! the authentication headers.
//!
//! # Running this example
//!
//! ```bash
//! cargo run --example signed_headers
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::str_to_string,
    clippy::uninlined_format_args,
    clippy::string_slice,
    reason = "examples are allowed to use println and simple formatting"
)]

use firstdata_gateway::signing::RequestSigner;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("First Data Gateway: Header Signing Example\n");

    // Step 1: Create the signer
    // The key id and HMAC key come from the terminal setup page.
    println!("1. Creating request signer...");
    let signer = RequestSigner::new("163440", "hmac-key-from-terminal-setup")?;
    println!("   ✓ Signer created");
    println!("   Key id: 163440");

    // Step 2: Sign a transaction body
    println!("\n2. Signing a POST body for /transaction/v14...");
    let request_body = br#"{"gateway_id":"AB1234-01","transaction_type":"00","amount":"52.99"}"#;

    let signed = signer.sign("/transaction/v14", request_body);
    println!("   ✓ Headers generated successfully\n");

    // Display signed header components
    println!("   HTTP Headers to include:");
    println!("   ┌─────────────────────────────────────────────────────────");
    println!("   │ Authorization: {}", signed.authorization);
    println!("   │");
    println!("   │ X-GGe4-Content-SHA1: {}", signed.content_sha1);
    println!("   │");
    println!("   │ X-GGe4-Date: {}", signed.date);
    println!("   └─────────────────────────────────────────────────────────");

    // Step 3: Full wire header set
    println!("\n3. Complete header set for the HTTP request...");
    for (name, value) in signed.header_pairs() {
        println!("   {}: {}", name, value);
    }

    // Step 4: Demonstrate what the signature covers
    println!("\n4. Understanding the signed hash string...");
    println!("   Covered lines (newline-joined, in order):");
    println!("   - method:         always POST");
    println!("   - content type:   application/json; charset=UTF-8");
    println!("   - content digest: SHA-1 hash of the request body (hex)");
    println!("   - date:           UTC timestamp, second precision");
    println!("   - path:           request path, no scheme or host");
    println!();
    println!("   The HMAC-SHA1 of that string, base64-encoded, becomes:");
    println!("   Authorization: GGE4_API <key-id>:<signature>");

    // Step 5: Signatures across API versions
    println!("\n5. Signing the same body for multiple endpoint paths...");
    for path in ["/transaction/v11", "/transaction/v13", "/transaction/v14"] {
        let signed = signer.sign(path, request_body);
        println!("   ✓ Signed request to {}", path);
        println!("     Authorization preview: {}...", &signed.authorization[..24]);
    }

    println!("\n✓ Header signing example complete");
    println!("\nNext steps:");
    println!("  - Add these headers to your HTTPS POST body");
    println!("  - The gateway recomputes the digest over the received bytes");
    println!("  - Any body or clock mismatch fails authentication");

    Ok(())
}
