use anyhow::Result;
use model_structure_lint::lsp::server::serve;

#[tokio::main]
async fn main() -> Result<()> {
    serve().await
}
