//! Vigil neuron binary.

#[tokio::main]
async fn main() -> eyre::Result<()> {
    vigil_node::run().await
}
