// tests/pipeline_replay.rs

use std::io::Cursor;

use fswire::codec::{Encode, NetstringReader};
use fswire::errors::FswireError;
use fswire::event::{Event, EventId};
use fswire::pipeline::{EventSink, EventSource, RawEvent, TextTupleSource, parse_tuple_line, pump};
use fswire::types::Separator;
use fswire_test_utils::builders::TupleInputBuilder;
use fswire_test_utils::init_tracing;

#[test]
fn test_parse_tuple_line_accepts_numeric_and_named_flags() {
    assert_eq!(
        parse_tuple_line("5\t0x10100\t/tmp/a", 1).unwrap(),
        RawEvent::new("/tmp/a", 5, 0x10100)
    );
    assert_eq!(
        parse_tuple_line("6\t[ItemRemoved,ItemIsDir]\t/tmp/b", 1).unwrap(),
        RawEvent::new("/tmp/b", 6, 0x20200)
    );
    // Everything after the second tab belongs to the path.
    assert_eq!(
        parse_tuple_line("7\t0\t/tmp/with\ttab", 1).unwrap().path,
        "/tmp/with\ttab"
    );
}

#[test]
fn test_parse_tuple_line_errors_carry_line_number() {
    for line in ["5\t0x100", "x\t0\t/a", "5\tbits\t/a", "5\t[ItemCreated\t/a"] {
        match parse_tuple_line(line, 42) {
            Err(FswireError::MalformedTuple { line: no, .. }) => assert_eq!(no, 42),
            other => panic!("{line:?} should be malformed, got {other:?}"),
        }
    }
}

#[test]
fn test_pump_encodes_every_event_in_order() {
    init_tracing();
    let input = TupleInputBuilder::new()
        .line("# recorded session")
        .event(10, "[ItemCreated,ItemIsFile]", "/tmp/a")
        .line("")
        .event(11, "0x1000", "/tmp/a")
        .event(12, "[RootChanged]", "/tmp")
        .build();

    let mut source = TextTupleSource::new(Cursor::new(input));
    let mut sink = EventSink::new(Vec::new(), Separator::None);
    let summary = pump(&mut source, &mut sink).unwrap();

    assert_eq!(summary.events, 3);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.rescans, 1);
    assert_eq!(summary.last_id, Some(EventId::new(12)));
    assert_eq!(source.latest_id(), Some(EventId::new(12)));
    assert_eq!(source.line_no(), 5);
    assert_eq!(sink.units(), 3);

    let bytes = sink.into_inner();
    let mut expected = Vec::new();
    Event::new("/tmp/a", 10, 0x10100).encode_into(&mut expected);
    Event::new("/tmp/a", 11, 0x1000).encode_into(&mut expected);
    Event::new("/tmp", 12, 0x20).encode_into(&mut expected);
    assert_eq!(bytes, expected);
}

#[test]
fn test_pump_skips_malformed_lines() {
    init_tracing();
    let input = TupleInputBuilder::new()
        .event(1, "0x100", "/a")
        .line("garbage")
        .line("2\tnot-bits\t/b")
        .event(3, "0x200", "/c")
        .build();

    let mut source = TextTupleSource::new(input.as_bytes());
    let mut sink = EventSink::new(Vec::new(), Separator::Newline);
    let summary = pump(&mut source, &mut sink).unwrap();

    assert_eq!(summary.events, 2);
    assert_eq!(summary.skipped, 2);

    let decoded: Vec<Event> = NetstringReader::new(&sink.into_inner()[..])
        .map(|value| Event::from_value(&value.unwrap()).unwrap())
        .collect();
    assert_eq!(
        decoded,
        vec![Event::new("/a", 1, 0x100), Event::new("/c", 3, 0x200)]
    );
}

#[test]
fn test_pump_skips_lines_that_are_not_utf8() {
    init_tracing();
    let input = b"1\t0x100\t/a\n2\t0x100\t/b\xff\n3\t0x200\t/c\n";

    let mut source = TextTupleSource::new(&input[..]);
    let mut sink = EventSink::new(Vec::new(), Separator::None);
    let summary = pump(&mut source, &mut sink).unwrap();

    assert_eq!(summary.events, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(source.line_no(), 3);

    let mut expected = Vec::new();
    Event::new("/a", 1, 0x100).encode_into(&mut expected);
    Event::new("/c", 3, 0x200).encode_into(&mut expected);
    assert_eq!(sink.into_inner(), expected);
}

#[test]
fn test_invalid_utf8_line_is_a_malformed_tuple() {
    let mut source = TextTupleSource::new(&b"\xfe\t0\t/x\n"[..]);
    match source.next_event() {
        Some(Err(FswireError::MalformedTuple { line, reason })) => {
            assert_eq!(line, 1);
            assert!(reason.contains("UTF-8"));
        }
        other => panic!("expected MalformedTuple, got {other:?}"),
    }
    assert!(source.next_event().is_none());
}

#[test]
fn test_only_newline_ends_a_tuple_line() {
    let mut source = TextTupleSource::new(&b"4\t0\t/tmp/cr\r\n"[..]);
    let raw = source.next_event().unwrap().unwrap();
    assert_eq!(raw.path, "/tmp/cr\r");
}

#[test]
fn test_newline_separator_follows_each_unit() {
    let mut sink = EventSink::new(Vec::new(), Separator::Newline);
    sink.write("a").unwrap();
    sink.write(&true).unwrap();
    assert_eq!(sink.bytes(), 11);
    assert_eq!(sink.into_inner(), b"1,a\n4!true\n");
}

#[test]
fn test_iterators_are_event_sources() {
    let mut source = vec![
        RawEvent::new("/x", 1, 0x2),
        RawEvent::new("/y", 2, 0x0),
    ]
    .into_iter();
    let mut sink = EventSink::new(Vec::new(), Separator::None);

    let summary = pump(&mut source, &mut sink).unwrap();
    assert_eq!(summary.events, 2);
    assert_eq!(summary.rescans, 1);
    assert_eq!(summary.last_id, Some(EventId::new(2)));
    assert_eq!(source.latest_id(), None);
}

#[test]
fn test_raw_event_converts_to_event() {
    let event: Event = RawEvent::new("/z", 9, 0x10).into();
    assert_eq!(event, Event::new("/z", 9, 0x10));
    assert_eq!(event.flags.to_string(), "[HistoryDone]");
}
