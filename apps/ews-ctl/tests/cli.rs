use std::path::PathBuf;

use clap::Parser;

use ews_ctl::{Args, AttachmentCommand, CategoriesCommand, Command, MessageCommand};
use ews_domain::Color;

fn parse(args: &[&str]) -> Args {
	Args::try_parse_from(args.iter().copied()).expect("Arguments should parse.")
}

#[test]
fn categories_add_accepts_names_and_numbers() {
	let args = parse(&[
		"ews-ctl", "-c", "ews.toml", "categories", "add", "Travel", "--color", "dark-blue",
	]);

	assert_eq!(args.config, PathBuf::from("ews.toml"));
	assert!(matches!(
		args.command,
		Command::Categories(CategoriesCommand::Add { ref name, color: Color::DarkBlue })
			if name == "Travel"
	));

	let args = parse(&["ews-ctl", "-c", "ews.toml", "categories", "add", "Plain", "--color", "-1"]);

	assert!(matches!(
		args.command,
		Command::Categories(CategoriesCommand::Add { color: Color::None, .. })
	));

	let args = parse(&["ews-ctl", "--config", "ews.toml", "categories", "add", "Default"]);

	assert!(matches!(
		args.command,
		Command::Categories(CategoriesCommand::Add { color: Color::None, .. })
	));
}

#[test]
fn out_of_palette_color_is_rejected() {
	let result = Args::try_parse_from([
		"ews-ctl", "-c", "ews.toml", "categories", "add", "Bad", "--color", "25",
	]);

	assert!(result.is_err());
}

#[test]
fn categories_list_json_flag() {
	let args = parse(&["ews-ctl", "-c", "ews.toml", "categories", "list", "--json"]);

	assert!(matches!(args.command, Command::Categories(CategoriesCommand::List { json: true })));
}

#[test]
fn message_send_collects_recipients_and_attachments() {
	let args = parse(&[
		"ews-ctl", "-c", "ews.toml", "message", "send", "--to", "a@example.com", "--to",
		"b@example.com", "--subject", "Hi", "--body", "<p>Hello</p>", "--attach", "report.pdf",
	]);
	let Command::Message(MessageCommand::Send(compose)) = args.command else {
		panic!("Expected message send.");
	};

	assert_eq!(compose.to, ["a@example.com", "b@example.com"]);
	assert_eq!(compose.attach, [PathBuf::from("report.pdf")]);
	assert!(compose.cc.is_empty());
	assert!(!compose.text);
}

#[test]
fn message_send_requires_a_recipient() {
	let result = Args::try_parse_from([
		"ews-ctl", "-c", "ews.toml", "message", "send", "--subject", "Hi", "--body", "x",
	]);

	assert!(result.is_err());
}

#[test]
fn set_categories_uses_repeated_flag() {
	let args = parse(&[
		"ews-ctl", "-c", "ews.toml", "message", "set-categories", "--id", "AAA=", "--category",
		"Blue", "--category", "Red",
	]);
	let Command::Message(MessageCommand::SetCategories { id, change_key, categories }) =
		args.command
	else {
		panic!("Expected set-categories.");
	};

	assert_eq!(id, "AAA=");
	assert_eq!(change_key, None);
	assert_eq!(categories, ["Blue", "Red"]);
}

#[test]
fn message_find_and_attachment_get() {
	let args = parse(&[
		"ews-ctl", "-c", "ews.toml", "message", "find", "--internet-message-id", "<x@example.com>",
	]);

	assert!(matches!(
		args.command,
		Command::Message(MessageCommand::Find { ref internet_message_id })
			if internet_message_id == "<x@example.com>"
	));

	let args =
		parse(&["ews-ctl", "-c", "ews.toml", "attachment", "get", "--id", "A1", "--out", "dl"]);
	let Command::Attachment(AttachmentCommand::Get { ids, out }) = args.command else {
		panic!("Expected attachment get.");
	};

	assert_eq!(ids, ["A1"]);
	assert_eq!(out, PathBuf::from("dl"));
}
