use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = ews_ctl::Args::parse();
	ews_ctl::run(args).await
}
