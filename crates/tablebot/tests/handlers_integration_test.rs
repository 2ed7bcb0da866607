//! Integration tests for the Telegram handlers using teloxide_tests
//!
//! These run the production dispatcher schema against a mocked Bot API.
//! Run with: cargo test -p tablebot --test handlers_integration_test

use pretty_assertions::assert_eq;
use serial_test::serial;
use std::sync::Arc;

use teloxide::types::ParseMode;
use teloxide_tests::{MockBot, MockMessageDocument, MockMessageText};

use tablebot::telegram::{schema, HandlerDeps, MemoryFiles};
use tablecore::analyst::{NO_DATA_TEXT, UNSUPPORTED_FORMAT_TEXT, WELCOME_TEXT};
use tablecore::Analyst;

const SALES_CSV: &str = "region,units,price\nnorth,10,2.5\nsouth,20,3.5\neast,30,4.5\n";

fn test_deps() -> HandlerDeps {
    HandlerDeps::new(Analyst::default())
}

/// Deps whose document downloads are served from memory
fn deps_with_files(files: &[(&str, &str)]) -> HandlerDeps {
    let files = MemoryFiles::new(
        files
            .iter()
            .map(|(name, body)| (name.to_string(), body.as_bytes().to_vec())),
    );
    test_deps().with_files(Arc::new(files))
}

#[tokio::test]
#[serial]
async fn test_start_sends_welcome() {
    let message = MockMessageText::new().text("/start");
    let mut bot = MockBot::new(message, schema(test_deps()));

    bot.dispatch().await;

    let responses = bot.get_responses();
    let sent_messages = &responses.sent_messages;
    assert_eq!(sent_messages.len(), 1, "Should send exactly one message");
    assert_eq!(sent_messages[0].text(), Some(WELCOME_TEXT));
}

#[tokio::test]
#[serial]
async fn test_stats_without_upload() {
    let message = MockMessageText::new().text("/stats");
    let mut bot = MockBot::new(message, schema(test_deps()));

    bot.dispatch().await;

    let responses = bot.get_responses();
    assert_eq!(responses.sent_messages.len(), 1);
    assert_eq!(responses.sent_messages[0].text(), Some(NO_DATA_TEXT));
}

#[tokio::test]
#[serial]
async fn test_plot_without_upload() {
    let message = MockMessageText::new().text("/plot");
    let mut bot = MockBot::new(message, schema(test_deps()));

    bot.dispatch().await;

    let responses = bot.get_responses();
    assert_eq!(responses.sent_messages.len(), 1);
    assert_eq!(responses.sent_messages[0].text(), Some(NO_DATA_TEXT));
}

#[tokio::test]
#[serial]
async fn test_plain_text_is_ignored() {
    let message = MockMessageText::new().text("hello there");
    let mut bot = MockBot::new(message, schema(test_deps()));

    bot.dispatch().await;

    assert!(bot.get_responses().sent_messages.is_empty());
}

#[tokio::test]
#[serial]
async fn test_unknown_command_is_ignored() {
    let message = MockMessageText::new().text("/history");
    let mut bot = MockBot::new(message, schema(test_deps()));

    bot.dispatch().await;

    assert!(bot.get_responses().sent_messages.is_empty());
}

#[tokio::test]
#[serial]
async fn test_unsupported_document_is_rejected() {
    let message = MockMessageDocument::new().file_name("notes.txt".to_string());
    let mut bot = MockBot::new(message, schema(deps_with_files(&[("notes.txt", "a,b\n1,2\n")])));

    bot.dispatch().await;

    let responses = bot.get_responses();
    assert_eq!(responses.sent_messages.len(), 1);
    assert_eq!(responses.sent_messages[0].text(), Some(UNSUPPORTED_FORMAT_TEXT));
}

#[tokio::test]
#[serial]
async fn test_oversized_document_is_rejected_before_download() {
    // Nothing stored: a download attempt would answer with a different error
    let message = MockMessageDocument::new()
        .file_name("huge.csv".to_string())
        .file_size(25 * 1024 * 1024);
    let mut bot = MockBot::new(message, schema(deps_with_files(&[])));

    bot.dispatch().await;

    let responses = bot.get_responses();
    assert_eq!(responses.sent_messages.len(), 1);
    let text = responses.sent_messages[0].text().unwrap();
    assert!(text.starts_with("❌ Error processing file:"), "got {}", text);
    assert!(text.contains("file too large"), "got {}", text);
}

#[tokio::test]
#[serial]
async fn test_csv_upload_then_stats() {
    let message = MockMessageDocument::new().file_name("sales.csv".to_string());
    let mut bot = MockBot::new(message, schema(deps_with_files(&[("sales.csv", SALES_CSV)])));

    bot.dispatch().await;

    let responses = bot.get_responses();
    assert_eq!(responses.sent_messages.len(), 1);
    assert_eq!(
        responses.sent_messages[0].text(),
        Some("✅ Loaded 3 rows, 3 columns\nUse /stats or /plot to analyze")
    );

    // Same mock sender, so the same session
    bot.update(MockMessageText::new().text("/stats"));
    bot.dispatch().await;

    let responses = bot.get_responses();
    let stats = responses.sent_messages_text.last().unwrap();
    let text = stats.message.text().unwrap();
    assert!(text.contains("Basic Statistics"), "got {}", text);
    assert!(text.contains("units"));
    assert!(text.contains("price"));
    assert!(text.contains("count"));
    assert!(!text.contains("region"));
    assert_eq!(stats.bot_request.parse_mode, Some(ParseMode::MarkdownV2));
}
