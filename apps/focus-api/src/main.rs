use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = focus_api::Args::parse();

	focus_api::run(args).await
}
