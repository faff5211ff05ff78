pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use ews_domain::Color;
use ews_service::EwsService;

#[derive(Debug, Parser)]
#[command(
	version = ews_cli::VERSION,
	rename_all = "kebab",
	styles = ews_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Master category list of the mailbox.
	#[command(subcommand)]
	Categories(CategoriesCommand),
	#[command(subcommand)]
	Message(MessageCommand),
	#[command(subcommand)]
	Attachment(AttachmentCommand),
}

#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
	List {
		#[arg(long)]
		json: bool,
	},
	Add {
		name: String,
		/// Palette name such as `dark-blue`, or a number from -1 to 24.
		#[arg(long, default_value = "none", allow_hyphen_values = true)]
		color: Color,
	},
	Delete {
		name: String,
	},
}

#[derive(Debug, Subcommand)]
pub enum MessageCommand {
	Get {
		#[arg(long)]
		id: String,
		#[arg(long)]
		change_key: Option<String>,
	},
	/// Looks a message up in the inbox by its Message-ID header.
	Find {
		#[arg(long)]
		internet_message_id: String,
	},
	/// Saves the message as a draft and sends it.
	Send(ComposeArgs),
	Draft(ComposeArgs),
	/// Replaces the categories of a message.
	SetCategories {
		#[arg(long)]
		id: String,
		#[arg(long)]
		change_key: Option<String>,
		#[arg(long = "category", value_name = "NAME")]
		categories: Vec<String>,
	},
}

#[derive(Debug, clap::Args)]
pub struct ComposeArgs {
	#[arg(long, value_name = "ADDR", required = true)]
	pub to: Vec<String>,
	#[arg(long, value_name = "ADDR")]
	pub cc: Vec<String>,
	#[arg(long)]
	pub subject: String,
	#[arg(long)]
	pub body: String,
	/// Sends the body as plain text instead of HTML.
	#[arg(long)]
	pub text: bool,
	#[arg(long, value_name = "FILE")]
	pub attach: Vec<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum AttachmentCommand {
	/// Downloads file attachments into a directory.
	Get {
		#[arg(long = "id", value_name = "ID", required = true)]
		ids: Vec<String>,
		#[arg(long, value_name = "DIR")]
		out: PathBuf,
	},
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = ews_config::load(&args.config)?;
	ews_cli::init_tracing(&config.service.log_level);
	let service = EwsService::new(config)?;

	match args.command {
		Command::Categories(command) => commands::categories(&service, command).await,
		Command::Message(command) => commands::message(&service, command).await,
		Command::Attachment(command) => commands::attachment(&service, command).await,
	}
}
