// Test serialization using json
#![cfg(feature = "serde")]

use atlas_text::fonts::{CodepointRange, Height};
use atlas_text::{Align, AtlasRect, CharacterMapping, Color, Rect, Vec2};
use serde::{de::Deserialize, ser::Serialize};
use std::cmp::PartialEq;
use std::fmt::Debug;

fn test<X: Debug + PartialEq + Serialize + for<'a> Deserialize<'a>>(x: X, t: &str) {
    match serde_json::to_string(&x) {
        Ok(text) => assert_eq!(text, t),
        Err(err) => panic!("Ser of '{x:?}' failed: {err}"),
    }

    match serde_json::from_str::<X>(t) {
        Ok(v) => assert_eq!(v, x),
        Err(err) => panic!("Deser of '{t}' failed: {err}"),
    }
}

#[test]
fn vec2() {
    test(Vec2(1.0, 2.0), "[1.0,2.0]");
}

#[test]
fn align() {
    test(Align::Center, "\"Center\"");
}

#[test]
fn rects() {
    test(
        AtlasRect { x: 1, y: 2, w: 3, h: 4 },
        "{\"x\":1,\"y\":2,\"w\":3,\"h\":4}",
    );
    test(
        Rect { x: 0.5, y: -8.0, w: 5.0, h: 8.0 },
        "{\"x\":0.5,\"y\":-8.0,\"w\":5.0,\"h\":8.0}",
    );
}

#[test]
fn font() {
    test(Color::rgba(255, 0, 128, 255), "{\"r\":255,\"g\":0,\"b\":128,\"a\":255}");
    test(Height::Points(12.0), "{\"Points\":12.0}");
    test(CodepointRange::ASCII, "{\"first\":32,\"last\":126}");
}

#[test]
fn reversed_range() {
    let err = serde_json::from_str::<CodepointRange>("{\"first\":100,\"last\":1}").unwrap_err();
    assert!(err.to_string().contains("invalid codepoint range"), "{err}");
}

#[test]
fn mapping() {
    test(
        CharacterMapping {
            src: AtlasRect { x: 6, y: 0, w: 5, h: 8 },
            dst: Rect { x: 0.0, y: -8.0, w: 5.0, h: 8.0 },
            codepoint: 'H',
            advance: 6.0,
            offset: Vec2(0.0, -8.0),
        },
        "{\"src\":{\"x\":6,\"y\":0,\"w\":5,\"h\":8},\
         \"dst\":{\"x\":0.0,\"y\":-8.0,\"w\":5.0,\"h\":8.0},\
         \"codepoint\":\"H\",\"advance\":6.0,\"offset\":[0.0,-8.0]}",
    );
}
