//! Fuzz target for color packing and the color-key adjustment.

#![no_main]

use fluent_backdrop::color::Color;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|packed: u32| {
    let color = Color::from_argb(packed);
    assert_eq!(color.to_argb(), packed, "Packing must roundtrip");

    let key = color.transparent_key();
    if color.r == color.b {
        assert_eq!(key.to_argb(), packed | 1, "Equal red and blue set the low bit");
        assert_eq!((key.a, key.r, key.g), (color.a, color.r, color.g));
    } else {
        assert_eq!(key, color, "Distinct red and blue are unchanged");
    }

    let luminance = 5 * color.g as u32 + 2 * color.r as u32 + color.b as u32;
    assert_eq!(color.is_light(), luminance > 1024);

    // Display output must parse back to the same color
    let text = color.to_string();
    assert_eq!(text.parse::<Color>().ok(), Some(color));
});
