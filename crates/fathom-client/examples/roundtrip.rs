//! Full document lifecycle against the in-process endpoint.
//!
//! Run with `cargo run -p fathom-client --example roundtrip`. Set
//! `RUST_LOG=debug` to see the per-operation events.

use fathom_client::{DocumentFields, DocumentSource, IndexClient, MemoryEndpoint};
use fathom_core::{now_iso, Address, DocumentRef};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut client = IndexClient::new(MemoryEndpoint::new());
    client.open("127.0.0.1:9300".parse::<Address>()?).await?;

    let reference = DocumentRef::new("msg", "tweet", "1");
    let fields = DocumentFields::new()
        .field("username", "A")
        .field("sendDate", now_iso())
        .field("msg", "hello");
    let indexed = client.index_document(&reference, fields).await?;
    println!("indexed {reference}: {:?} v{:?}", indexed.status, indexed.version);

    let updated = client
        .update_document(&reference, DocumentSource::raw_json(r#"{"msg":"hi"}"#))
        .await?;
    println!("updated {reference}: {:?} v{:?}", updated.status, updated.version);

    let fetched = client.get_document(&reference).await?;
    println!("fetched {reference}: {:?}", fetched.payload);

    let deleted = client.delete_document(&reference).await?;
    println!("deleted {reference}: {:?}", deleted.status);

    client.close();
    Ok(())
}
