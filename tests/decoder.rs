use amcomp::{
    avec::transaction,
    sans::{
        Annotation, AnnotationClass, ChannelRequirementError, Decoder, Event, Level, Phase, Span,
    },
};

const SETUP_HEADER: [u8; 16] = [
    0x01, 0x02, 0xA0, 0x00, 0x10, 0x00, 0x01, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00,
];

fn chip_select(at: u64, previous: Option<Level>, new: Option<Level>) -> Event {
    Event::ChipSelect {
        span: Span::new(at, at),
        previous,
        new,
    }
}

fn data(at: u64, host: u8) -> Event {
    Event::Data {
        span: Span::new(at, at + 1),
        host: Some(host),
        device: Some(0xFF),
    }
}

/// Released, asserted, released: the decoder is primed by a rising edge.
fn rising_edge() -> [Event; 3] {
    [
        chip_select(0, None, Some(Level::Released)),
        chip_select(0, Some(Level::Released), Some(Level::Asserted)),
        chip_select(0, Some(Level::Asserted), Some(Level::Released)),
    ]
}

fn feed(decoder: &mut Decoder, events: &[Event]) -> Vec<Annotation> {
    let mut out: Vec<Annotation> = Vec::new();
    for event in events {
        decoder.on_event(event, &mut out).unwrap();
    }
    out
}

fn host_events(start: u64, bytes: &[u8]) -> Vec<Event> {
    bytes
        .iter()
        .enumerate()
        .map(|(i, b)| data(start + i as u64, *b))
        .collect()
}

fn count(out: &[Annotation], class: AnnotationClass) -> usize {
    out.iter().filter(|a| a.class == class).count()
}

fn setup_transaction(id: u16, inverse: u16) -> Vec<(u8, u8)> {
    let mut host = SETUP_HEADER.to_vec();
    host.extend(id.to_le_bytes());
    host.extend(inverse.to_le_bytes());
    host.extend([0x64, 0x01]);
    host.into_iter().map(|b| (b, 0x00)).collect()
}

#[test]
fn setup_frame_without_warnings() {
    let mut decoder = Decoder::new();
    let mut out = feed(&mut decoder, &rising_edge());
    out.extend(feed(&mut decoder, &host_events(1, &SETUP_HEADER)));
    out.extend(feed(&mut decoder, &host_events(17, &[0x34, 0x12, 0xCB, 0xED, 0x64, 0x01])));

    assert_eq!(count(&out, AnnotationClass::Command), 9);
    assert_eq!(count(&out, AnnotationClass::RxData), 4);
    assert_eq!(count(&out, AnnotationClass::Warning), 0);
    assert_eq!(out[2].text, "TICK = 1.6 s");
    assert_eq!(out[12].text, "TELM = 1");
    assert_eq!(decoder.phase(), Phase::Complete);
}

#[test]
fn notify_frame_rejects_further_data() {
    let mut header = SETUP_HEADER;
    header[0] = 0x03;

    let mut decoder = Decoder::new();
    feed(&mut decoder, &rising_edge());
    let out = feed(&mut decoder, &host_events(1, &header));
    assert_eq!(out.len(), 9);
    assert_eq!(decoder.phase(), Phase::Complete);

    let out = feed(&mut decoder, &[data(17, 0x00)]);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].class, AnnotationClass::Warning);
    assert_eq!(out[0].text, "Unexpected Data");
    assert_eq!(out[0].span, Span::new(17, 18));

    // The next transaction decodes normally.
    let out = feed(
        &mut decoder,
        &[
            chip_select(18, Some(Level::Released), Some(Level::Asserted)),
            chip_select(19, Some(Level::Asserted), Some(Level::Released)),
            data(20, 0x02),
        ],
    );
    assert_eq!(out[0].text, "Cmd FETCH");
    assert_eq!(decoder.phase(), Phase::HeaderDecode);
}

#[test]
fn missing_chip_select_silences_decoder() {
    let mut decoder = Decoder::new();
    let mut out: Vec<Annotation> = Vec::new();

    let result = decoder.on_event(&chip_select(0, None, None), &mut out);
    assert_eq!(result, Err(ChannelRequirementError::ChipSelect));

    for event in rising_edge().iter().chain(&host_events(1, &SETUP_HEADER)) {
        assert_eq!(decoder.on_event(event, &mut out), Ok(()));
    }
    assert!(out.is_empty());
}

#[test]
fn slice_decoding_stops_at_missing_channel() {
    let mut events: Vec<Event> = rising_edge().to_vec();
    events.extend(host_events(1, &SETUP_HEADER[..2]));
    events.push(Event::Data {
        span: Span::new(3, 4),
        host: None,
        device: Some(0x00),
    });
    events.extend(host_events(4, &SETUP_HEADER[2..]));

    let mut out: Vec<Annotation> = Vec::new();
    let result = amcomp::avec::decode_slice(&events, &mut out);

    assert_eq!(
        result,
        Err(amcomp::avec::slice::Error::Channel(ChannelRequirementError::Data))
    );
    assert_eq!(out.len(), 2);
}

#[test]
fn decoding_is_deterministic() {
    let pairs = setup_transaction(0xBEEF, 0x1234);
    let events: Vec<Event> = transaction::events(&pairs).collect();

    let mut first: Vec<Annotation> = Vec::new();
    amcomp::avec::decode_slice(&events, &mut first).unwrap();
    let mut second: Vec<Annotation> = Vec::new();
    amcomp::avec::decode_slice(&events, &mut second).unwrap();

    assert_eq!(first, second);
    assert_eq!(count(&first, AnnotationClass::Warning), 1);
}

#[test]
fn complement_ids_never_warn() {
    for id in 0..=u16::MAX {
        let pairs = setup_transaction(id, !id);
        let events: Vec<Event> = transaction::events(&pairs).collect();

        let mut out: Vec<Annotation> = Vec::new();
        amcomp::avec::decode_slice(&events, &mut out).unwrap();
        assert_eq!(count(&out, AnnotationClass::Warning), 0, "id {id:#06x}");
    }
}

#[test]
fn other_ids_warn_once() {
    for (id, inverse) in [(0x1234, 0x1234), (0x0000, 0x0000), (0xFFFF, 0x0001), (0x8000, 0x8FFF)] {
        let pairs = setup_transaction(id, inverse);
        let events: Vec<Event> = transaction::events(&pairs).collect();

        let mut out: Vec<Annotation> = Vec::new();
        amcomp::avec::decode_slice(&events, &mut out).unwrap();

        let warnings: Vec<_> = out
            .iter()
            .filter(|a| a.class == AnnotationClass::Warning)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].text, "Companion ID mismatch");
        assert_eq!(warnings[0].span, Span::new(16, 20));
    }
}

#[test]
fn fetch_stream_annotates_every_word() {
    let mut host = SETUP_HEADER.to_vec();
    host[0] = 0x02;
    host.extend([0x01, 0x00, 0x02, 0x00, 0x03, 0x00]);
    let pairs: Vec<(u8, u8)> = host.into_iter().map(|b| (b, 0x00)).collect();

    let mut out: Vec<Annotation> = Vec::new();
    amcomp::avec::decode_slice(&transaction::events(&pairs).collect::<Vec<_>>(), &mut out).unwrap();

    let telemetry: Vec<_> = out[9..].iter().map(|a| a.text.as_str()).collect();
    assert_eq!(telemetry, ["TLM = 1", "TLM = 2", "TLM = 3"]);
    assert!(out[9..].iter().all(|a| a.class == AnnotationClass::RxData));
}
