use std::{
	fs,
	path::{Path, PathBuf},
};

use color_eyre::eyre;
use serde::Serialize;
use time::OffsetDateTime;

use ews_service::{
	Draft, EwsService,
	types::{Attachment, AttachmentId, BodyType, FileAttachment, ItemId, Message},
};

use crate::{AttachmentCommand, CategoriesCommand, ComposeArgs, MessageCommand};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Printable view of a message.
#[derive(Debug, Serialize)]
pub struct MessageView {
	pub id: Option<String>,
	pub change_key: Option<String>,
	pub subject: Option<String>,
	pub from: Option<String>,
	pub to: Vec<String>,
	#[serde(with = "ews_domain::time_serde::option")]
	pub received: Option<OffsetDateTime>,
	pub categories: Vec<String>,
	pub internet_message_id: Option<String>,
	pub is_read: Option<bool>,
	pub headers: Vec<(String, String)>,
}
impl From<&Message> for MessageView {
	fn from(message: &Message) -> Self {
		let address = |mailbox: &ews_service::types::Mailbox| mailbox.email_address.clone();

		Self {
			id: message.item_id.as_ref().map(|id| id.id.clone()),
			change_key: message.item_id.as_ref().and_then(|id| id.change_key.clone()),
			subject: message.subject.clone(),
			from: message.from.as_ref().and_then(|from| address(&from.mailbox)),
			to: message
				.to_recipients
				.iter()
				.flat_map(|recipients| recipients.mailboxes.iter())
				.filter_map(address)
				.collect(),
			received: message.date_time_received,
			categories: message.category_names().to_vec(),
			internet_message_id: message.internet_message_id.clone(),
			is_read: message.is_read,
			headers: message
				.headers()
				.map(|(name, value)| (name.to_string(), value.to_string()))
				.collect(),
		}
	}
}

pub async fn categories(
	service: &EwsService,
	command: CategoriesCommand,
) -> color_eyre::Result<()> {
	match command {
		CategoriesCommand::List { json } => {
			let handle = service.fetch_category_list().await?;

			if json {
				ews_cli::print_json(&handle.document)?;
			} else {
				for category in &handle.document.categories {
					println!("{}\t{}\t{}", category.name, category.color, category.guid);
				}
			}
		},
		CategoriesCommand::Add { name, color } => {
			let handle = service.add_category(&name, color).await?;

			println!("Added {name:?}. The list now has {} categories.", handle.document.len());
		},
		CategoriesCommand::Delete { name } => {
			let handle = service.delete_category(&name).await?;

			println!("Deleted {name:?}. The list now has {} categories.", handle.document.len());
		},
	}

	Ok(())
}

pub async fn message(service: &EwsService, command: MessageCommand) -> color_eyre::Result<()> {
	match command {
		MessageCommand::Get { id, change_key } => {
			let message = service.get_message(item_id(id, change_key)).await?;

			ews_cli::print_json(&MessageView::from(&message))?;
		},
		MessageCommand::Find { internet_message_id } => {
			let message = service.find_message_by_internet_message_id(&internet_message_id).await?;

			ews_cli::print_json(&MessageView::from(&message))?;
		},
		MessageCommand::Send(compose) => {
			let item_id = service.send_email(draft(compose)?).await?;

			println!("Sent {}.", item_id.id);
		},
		MessageCommand::Draft(compose) => {
			let item_id = service.create_draft(draft(compose)?).await?;

			println!("Saved draft {}.", item_id.id);
		},
		MessageCommand::SetCategories { id, change_key, categories } => {
			let item_id =
				service.update_message_categories(item_id(id, change_key), categories).await?;

			println!("Updated {}.", item_id.id);
		},
	}

	Ok(())
}

pub async fn attachment(
	service: &EwsService,
	command: AttachmentCommand,
) -> color_eyre::Result<()> {
	match command {
		AttachmentCommand::Get { ids, out } => {
			let attachments =
				service.get_attachments(ids.into_iter().map(AttachmentId::new).collect()).await?;

			fs::create_dir_all(&out)?;

			for attachment in attachments {
				match attachment {
					Attachment::FileAttachment(file) => {
						let path = save_file(&out, &file)?;

						println!("{}", path.display());
					},
					Attachment::ItemAttachment(item) => {
						tracing::warn!(
							name = item.name.as_deref().unwrap_or_default(),
							"Skipping item attachment."
						);
					},
				}
			}
		},
	}

	Ok(())
}

fn item_id(id: String, change_key: Option<String>) -> ItemId {
	match change_key {
		Some(change_key) => ItemId::new(id).with_change_key(change_key),
		None => ItemId::new(id),
	}
}

fn draft(compose: ComposeArgs) -> color_eyre::Result<Draft> {
	let mut draft = Draft::new(compose.to, compose.subject, compose.body);

	draft.cc = compose.cc;

	if compose.text {
		draft.body_type = BodyType::Text;
	}

	for path in compose.attach {
		let bytes = fs::read(&path)?;
		let name = file_name(&path)?;

		draft = draft.with_attachment(FileAttachment::new(name, FALLBACK_CONTENT_TYPE, &bytes));
	}

	Ok(draft)
}

fn file_name(path: &Path) -> color_eyre::Result<String> {
	path.file_name()
		.and_then(|name| name.to_str())
		.map(str::to_string)
		.ok_or_else(|| eyre::eyre!("Attachment path {} has no file name.", path.display()))
}

/// Writes the attachment under `dir`, keeping only the final component of its name.
fn save_file(dir: &Path, file: &FileAttachment) -> color_eyre::Result<PathBuf> {
	let name = file.name.as_deref().unwrap_or("attachment");
	let name = Path::new(name)
		.file_name()
		.and_then(|name| name.to_str())
		.filter(|name| !name.is_empty())
		.unwrap_or("attachment");
	let bytes = file
		.content_bytes()?
		.ok_or_else(|| eyre::eyre!("Attachment {name:?} came back without content."))?;
	let path = dir.join(name);

	fs::write(&path, bytes)?;

	Ok(path)
}
