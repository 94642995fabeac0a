//! Tests for segment tracking and the stream driver.

use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use super::*;
use crate::sink::{ChannelSink, DeliveryMode, OpenAiSink, OutputEvent};

/// Records every sink call for inspection.
#[derive(Default)]
struct RecordingSink {
    chunks: Vec<String>,
    finished: Option<String>,
    error: Option<String>,
}

#[async_trait]
impl OutputSink for RecordingSink {
    async fn chunk(&mut self, text: &str) -> Result<(), SessionError> {
        self.chunks.push(text.to_string());
        Ok(())
    }

    async fn finish(&mut self, full_text: &str) -> Result<(), SessionError> {
        self.finished = Some(full_text.to_string());
        Ok(())
    }

    async fn error(&mut self, message: &str) -> Result<(), SessionError> {
        self.error = Some(message.to_string());
        Ok(())
    }
}

fn text(t: &str) -> String {
    format!(
        "data: {}",
        serde_json::json!({"type": "content_block_delta", "delta": {"type": "text_delta", "text": t}})
    )
}

fn thinking(t: &str) -> String {
    format!(
        "data: {}",
        serde_json::json!({"type": "content_block_delta", "delta": {"type": "thinking_delta", "thinking": t}})
    )
}

fn tool_json(t: &str) -> String {
    format!(
        "data: {}",
        serde_json::json!({"type": "content_block_delta", "delta": {"type": "input_json_delta", "partial_json": t}})
    )
}

fn error(message: &str) -> String {
    format!(
        "data: {}",
        serde_json::json!({"type": "error", "error": {"type": "rate_limit_error", "message": message}})
    )
}

fn body(lines: &[String]) -> Vec<u8> {
    let mut out = String::new();
    for line in lines {
        out.push_str("event: completion\n");
        out.push_str(line);
        out.push_str("\n\n");
    }
    out.into_bytes()
}

async fn run(lines: &[String]) -> (TranslateOutcome, RecordingSink) {
    let bytes = body(lines);
    let mut sink = RecordingSink::default();
    let outcome = translate(bytes.as_slice(), &mut sink, &CancellationToken::new())
        .await
        .unwrap();
    (outcome, sink)
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn text_passes_through_unchanged() {
    let mut t = EventTranslator::new();
    let event = parse_event_line(&text("Hello")).unwrap();
    assert_eq!(t.apply(&event), Step::Emit("Hello".into()));
    assert_eq!(t.segment(), Segment::Text);
}

#[test]
fn empty_text_delta_is_skipped() {
    let mut t = EventTranslator::new();
    t.apply(&parse_event_line(&thinking("x")).unwrap());
    assert_eq!(t.apply(&parse_event_line(&text("")).unwrap()), Step::Skip);
    // The reasoning segment stays open for the next real text.
    assert_eq!(t.segment(), Segment::Reasoning);
}

#[test]
fn consecutive_thinking_opens_once() {
    let mut t = EventTranslator::new();
    assert_eq!(
        t.apply(&parse_event_line(&thinking("a")).unwrap()),
        Step::Emit("<think> a".into())
    );
    assert_eq!(
        t.apply(&parse_event_line(&thinking("b")).unwrap()),
        Step::Emit("b".into())
    );
    assert_eq!(count(t.text(), REASONING_OPEN), 1);
}

#[test]
fn text_after_reasoning_closes_it() {
    let mut t = EventTranslator::new();
    t.apply(&parse_event_line(&thinking("plan")).unwrap());
    assert_eq!(
        t.apply(&parse_event_line(&text("Answer")).unwrap()),
        Step::Emit("</think>\nAnswer".into())
    );
    assert_eq!(t.segment(), Segment::Text);
}

#[test]
fn text_after_tool_call_closes_it() {
    let mut t = EventTranslator::new();
    assert_eq!(
        t.apply(&parse_event_line(&tool_json("{\"q\":")).unwrap()),
        Step::Emit("\n```\n {\"q\":".into())
    );
    t.apply(&parse_event_line(&tool_json("1}")).unwrap());
    assert_eq!(
        t.apply(&parse_event_line(&text("Done")).unwrap()),
        Step::Emit("\n```\nDone".into())
    );
}

#[test]
fn switching_segments_closes_the_open_one_first() {
    let mut t = EventTranslator::new();
    t.apply(&parse_event_line(&thinking("t")).unwrap());
    assert_eq!(
        t.apply(&parse_event_line(&tool_json("{}")).unwrap()),
        Step::Emit(format!("{REASONING_CLOSE}{TOOL_CALL_OPEN}{{}}"))
    );
    assert_eq!(t.segment(), Segment::ToolCall);
}

#[test]
fn unknown_delta_types_change_nothing() {
    let mut t = EventTranslator::new();
    t.apply(&parse_event_line(&thinking("t")).unwrap());
    let event = parse_event_line(
        r#"data: {"type":"content_block_delta","delta":{"type":"signature_delta","signature":"abc"}}"#,
    )
    .unwrap();
    assert_eq!(t.apply(&event), Step::Skip);
    assert_eq!(t.segment(), Segment::Reasoning);
    assert_eq!(t.text(), "<think> t");
}

#[test]
fn finish_closes_open_segment() {
    let mut t = EventTranslator::new();
    t.apply(&parse_event_line(&tool_json("{}")).unwrap());
    assert_eq!(t.finish(), TOOL_CALL_CLOSE);
    assert_eq!(t.finish(), "");
}

#[tokio::test]
async fn delimiters_balance_for_mixed_sequences() {
    let sequences: Vec<Vec<String>> = vec![
        vec![thinking("a"), thinking("b"), text("c")],
        vec![tool_json("{"), text("x"), tool_json("}"), text("y")],
        vec![thinking("a"), tool_json("{}"), thinking("b"), text("c"), thinking("d")],
        vec![text("only text")],
        vec![tool_json("{\"a\":1}")],
        vec![thinking("dangling")],
    ];

    for lines in sequences {
        let (outcome, sink) = run(&lines).await;
        assert_eq!(outcome, TranslateOutcome::Completed);
        let all = sink.chunks.concat();
        assert_eq!(
            count(&all, REASONING_OPEN),
            count(&all, REASONING_CLOSE),
            "reasoning delimiters unbalanced in {all:?}"
        );
        assert_eq!(
            count(&all, "\n```\n "),
            count(&all, TOOL_CALL_CLOSE) - count(&all, "\n```\n "),
            "tool-call delimiters unbalanced in {all:?}"
        );
    }
}

#[tokio::test]
async fn aggregated_text_equals_concatenated_chunks() {
    let lines = vec![
        thinking("Let me think"),
        thinking(" more"),
        text("The answer"),
        tool_json("{\"query\":\"x\"}"),
        text(" is 42."),
    ];
    let (_, sink) = run(&lines).await;
    assert_eq!(sink.finished.as_deref(), Some(sink.chunks.concat().as_str()));
    assert_eq!(
        sink.finished.unwrap(),
        "<think> Let me think more</think>\nThe answer\n```\n {\"query\":\"x\"}\n```\n is 42."
    );
}

#[tokio::test]
async fn error_event_truncates_output() {
    let lines = vec![text("partial"), error("Quota exceeded"), text("never")];
    let (outcome, sink) = run(&lines).await;
    assert_eq!(outcome, TranslateOutcome::BackendError("Quota exceeded".into()));
    assert_eq!(sink.error.as_deref(), Some("Quota exceeded"));
    assert_eq!(sink.chunks, vec!["partial".to_string()]);
    assert!(sink.finished.is_none());
}

#[tokio::test]
async fn aggregated_error_output_is_exactly_the_message() {
    let bytes = body(&[thinking("x"), text("partial"), error("Overloaded")]);
    let mut sink = OpenAiSink::new(Vec::new(), DeliveryMode::Aggregated, "m");
    translate(bytes.as_slice(), &mut sink, &CancellationToken::new())
        .await
        .unwrap();

    let output = String::from_utf8(sink.into_inner()).unwrap();
    let json: serde_json::Value = serde_json::from_str(output.trim_end()).unwrap();
    assert_eq!(json["choices"][0]["message"]["content"], "Overloaded");
}

#[tokio::test]
async fn streaming_and_aggregated_outputs_match() {
    let lines = vec![thinking("a"), text("b"), tool_json("c"), text("d")];
    let bytes = body(&lines);

    let (tx, mut rx) = mpsc::channel(64);
    let mut streaming = ChannelSink::new(tx, DeliveryMode::Streaming);
    translate(bytes.as_slice(), &mut streaming, &CancellationToken::new())
        .await
        .unwrap();
    drop(streaming);
    let mut streamed = String::new();
    while let Some(event) = rx.recv().await {
        if let OutputEvent::Delta(d) = event {
            streamed.push_str(&d);
        }
    }

    let (tx, mut rx) = mpsc::channel(64);
    let mut aggregated = ChannelSink::new(tx, DeliveryMode::Aggregated);
    translate(bytes.as_slice(), &mut aggregated, &CancellationToken::new())
        .await
        .unwrap();
    drop(aggregated);
    let first = rx.recv().await.unwrap();

    assert_eq!(first, OutputEvent::Delta(streamed));
    assert_eq!(rx.recv().await, Some(OutputEvent::Done));
}

#[tokio::test]
async fn non_payload_lines_are_ignored() {
    let raw = b"\n: ping\nevent: message_start\ndata: {\"type\":\"message_start\"}\n\ndata: not-json\ndata: {\"type\":\"content_block_delta\",\"delta\":{\"type\":\"text_delta\",\"text\":\"ok\"}}\n";
    let mut sink = RecordingSink::default();
    translate(&raw[..], &mut sink, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(sink.chunks, vec!["ok".to_string()]);
    assert_eq!(sink.finished.as_deref(), Some("ok"));
}

#[tokio::test]
async fn invalid_utf8_outside_payloads_is_ignored() {
    let mut raw = b": ping \xff\xfe\n".to_vec();
    raw.extend_from_slice(b"event: \xc3\n");
    raw.extend_from_slice(text("ok").as_bytes());
    raw.push(b'\n');

    let mut sink = RecordingSink::default();
    let outcome = translate(raw.as_slice(), &mut sink, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(outcome, TranslateOutcome::Completed);
    assert_eq!(sink.chunks, vec!["ok".to_string()]);
    assert_eq!(sink.finished.as_deref(), Some("ok"));
}

#[tokio::test]
async fn invalid_utf8_payload_is_skipped_in_aggregated_mode() {
    let mut raw = b"data: {\"type\":\"content_block_delta\",\"delta\":{\"type\":\"text_delta\",\"text\":\"\xff\"}}\n".to_vec();
    raw.extend_from_slice(text("fine").as_bytes());
    raw.push(b'\n');

    let mut sink = OpenAiSink::new(Vec::new(), DeliveryMode::Aggregated, "m");
    translate(raw.as_slice(), &mut sink, &CancellationToken::new())
        .await
        .unwrap();
    let output = String::from_utf8(sink.into_inner()).unwrap();
    let json: serde_json::Value = serde_json::from_str(output.trim_end()).unwrap();
    assert_eq!(json["choices"][0]["message"]["content"], "fine");
}

#[tokio::test]
async fn crlf_line_endings() {
    let raw = format!("event: completion\r\n{}\r\n\r\n{}\r\n", text("a"), text("b"));
    let mut sink = RecordingSink::default();
    translate(raw.as_bytes(), &mut sink, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(sink.chunks, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn line_terminators_are_trimmed() {
    assert_eq!(trim_line_end(b"data: x\r\n"), b"data: x");
    assert_eq!(trim_line_end(b"data: x\n"), b"data: x");
    assert_eq!(trim_line_end(b"data: x"), b"data: x");
}

#[tokio::test]
async fn cancelled_before_start_emits_nothing() {
    let bytes = body(&[text("a"), text("b")]);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut sink = RecordingSink::default();
    let outcome = translate(bytes.as_slice(), &mut sink, &cancel).await.unwrap();
    assert_eq!(outcome, TranslateOutcome::Cancelled);
    assert!(sink.chunks.is_empty());
    assert!(sink.finished.is_none());
}

#[tokio::test]
async fn cancellation_mid_stream_stops_emission() {
    let (client, mut server) = tokio::io::duplex(4096);
    let cancel = CancellationToken::new();
    let (tx, mut rx) = mpsc::channel(16);

    let task_cancel = cancel.clone();
    let task = tokio::spawn(async move {
        let mut sink = ChannelSink::new(tx, DeliveryMode::Streaming);
        translate(BufReader::new(client), &mut sink, &task_cancel).await
    });

    server
        .write_all(format!("{}\n", thinking("first")).as_bytes())
        .await
        .unwrap();
    assert_eq!(
        rx.recv().await,
        Some(OutputEvent::Delta("<think> first".into()))
    );

    cancel.cancel();
    let outcome = task.await.unwrap().unwrap();
    assert_eq!(outcome, TranslateOutcome::Cancelled);

    // The writer side is still open; nothing more must arrive.
    let _ = server
        .write_all(format!("{}\n", text("second")).as_bytes())
        .await;
    assert_eq!(rx.recv().await, None);
}

#[tokio::test]
async fn read_failure_is_a_stream_error() {
    struct Broken;

    impl tokio::io::AsyncRead for Broken {
        fn poll_read(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
            _buf: &mut tokio::io::ReadBuf<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Err(std::io::Error::other("connection reset")))
        }
    }

    let mut sink = RecordingSink::default();
    let err = translate(BufReader::new(Broken), &mut sink, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::Stream(msg) if msg.contains("connection reset")));
}
