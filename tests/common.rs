#![cfg(feature = "std")]

use std::path::Path;

use amcomp::{
    avec::transaction,
    sans::{Annotation, AnnotationClass, Sink},
};
use csv::ReaderBuilder;

#[test]
fn decode_slice_setup() {
    const PATH: &str = "fixtures/setup-frame.bin";
    let events = load_events(PATH);
    let mut validator = Validator::new(PATH);
    amcomp::avec::decode_slice(&events, &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_slice_fetch() {
    const PATH: &str = "fixtures/fetch-frame.bin";
    let events = load_events(PATH);
    let mut validator = Validator::new(PATH);
    amcomp::avec::decode_slice(&events, &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_slice_notify() {
    const PATH: &str = "fixtures/notify-frame.bin";
    let events = load_events(PATH);
    let mut validator = Validator::new(PATH);
    amcomp::avec::decode_slice(&events, &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_reader_setup() {
    const PATH: &str = "fixtures/setup-frame.bin";
    let mut file = std::fs::File::open(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    amcomp::avec::decode_reader(&mut file, &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_reader_fetch() {
    const PATH: &str = "fixtures/fetch-frame.bin";
    let mut file = std::fs::File::open(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    amcomp::avec::decode_reader(&mut file, &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_reader_notify() {
    const PATH: &str = "fixtures/notify-frame.bin";
    let mut file = std::fs::File::open(PATH).unwrap();
    let mut validator = Validator::new(PATH);
    amcomp::avec::decode_reader(&mut file, &mut validator).unwrap();
    validator.finish();
}

#[test]
fn decode_reader_ignores_unpaired_byte() {
    const PATH: &str = "fixtures/fetch-frame.bin";
    let mut data = std::fs::read(PATH).unwrap();
    data.push(0x42);
    let mut validator = Validator::new(PATH);
    amcomp::avec::decode_reader(&mut data.as_slice(), &mut validator).unwrap();
    validator.finish();
}

fn load_events(path: &str) -> Vec<amcomp::sans::Event> {
    let data = std::fs::read(path).unwrap();
    let pairs: Vec<(u8, u8)> = data.chunks_exact(2).map(|p| (p[0], p[1])).collect();
    transaction::events(&pairs).collect()
}

/// Expected annotations, one `start,end,class,text` row each.
struct Validator(Vec<Vec<String>>);

impl Validator {
    fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().with_extension("csv");

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)
            .unwrap();

        let expected: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .collect();

        Self(expected)
    }

    fn finish(self) {
        assert!(self.0.is_empty(), "missing annotations: {:?}", self.0);
    }
}

impl Sink for Validator {
    fn put(&mut self, annotation: Annotation) {
        assert!(!self.0.is_empty(), "unexpected annotation: {annotation:?}");
        let row = self.0.remove(0);

        assert_eq!(row[0], annotation.span.start.to_string());
        assert_eq!(row[1], annotation.span.end.to_string());
        assert_eq!(AnnotationClass::from_id(&row[2]), Some(annotation.class));
        assert_eq!(row[3], annotation.text);
    }
}
