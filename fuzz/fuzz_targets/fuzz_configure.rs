//! Fuzz target for configure sessions.
//!
//! Applies arbitrary sequences of builder calls and checks the committed
//! native calls against the final request.

#![no_main]

use arbitrary::Arbitrary;
use fluent_backdrop::apply::Compositor;
use fluent_backdrop::codec::{EncodedAttribute, WindowAttribute};
use fluent_backdrop::config::{Settings, SurfaceColors};
use fluent_backdrop::error::Result;
use fluent_backdrop::fluent::{Fluent, Target};
use fluent_backdrop::handle::WindowHandle;
use fluent_backdrop::theme::PersonalizationStore;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug, Clone, Copy)]
enum Op {
    Mica,
    Acrylic,
    Tabbed,
    None,
    AutoBackdrop,
    Dark,
    Light,
    Auto,
    ToTitleBar,
    ToFullWindow,
    Transparency,
    NoTransparency,
}

#[derive(Arbitrary, Debug)]
struct Input {
    app_light: Option<u32>,
    ops: Vec<Op>,
}

#[derive(Debug, PartialEq)]
enum Call {
    Attribute(WindowAttribute, i32),
    Paint(SurfaceColors),
    ClearKey,
}

#[derive(Default)]
struct Recorder(Vec<Call>);

impl Compositor for Recorder {
    fn set_attribute(&mut self, _window: WindowHandle, attribute: EncodedAttribute) -> Result<()> {
        self.0.push(Call::Attribute(attribute.attribute, attribute.value));
        Ok(())
    }

    fn paint_surface(&mut self, _window: WindowHandle, colors: SurfaceColors) -> Result<()> {
        self.0.push(Call::Paint(colors));
        Ok(())
    }

    fn clear_transparency_key(&mut self, _window: WindowHandle) -> Result<()> {
        self.0.push(Call::ClearKey);
        Ok(())
    }
}

struct FlagStore(Option<u32>);

impl PersonalizationStore for FlagStore {
    fn read_u32(&self, _path: &str, _name: &str) -> Result<Option<u32>> {
        Ok(self.0)
    }

    fn value_names(&self, _path: &str) -> Result<Option<Vec<String>>> {
        Ok(None)
    }
}

fuzz_target!(|input: Input| {
    let window = WindowHandle::from_raw(0x1000).unwrap();
    let mut fluent = Fluent::with_settings(
        Recorder::default(),
        FlagStore(input.app_light),
        &Settings::DEFAULT,
    );

    let mut session = fluent.configure(window);
    for op in &input.ops {
        session = match op {
            Op::Mica => session.mica(),
            Op::Acrylic => session.acrylic(),
            Op::Tabbed => session.tabbed(),
            Op::None => session.none(),
            Op::AutoBackdrop => session.auto_backdrop(),
            Op::Dark => session.dark(),
            Op::Light => session.light(),
            Op::Auto => session.auto(),
            Op::ToTitleBar => session.to_title_bar(),
            Op::ToFullWindow => session.to_full_window(),
            Op::Transparency => session.transparency(),
            Op::NoTransparency => session.no_transparency(),
        };
    }

    let request = *session.request();
    session.apply().unwrap();

    let calls = &fluent.applicator().compositor().0;
    let theme = Call::Attribute(WindowAttribute::UseImmersiveDarkMode, request.dark as i32);

    if request.target == Target::TitleBar {
        assert_eq!(calls, &[theme], "Titlebar target must only set the theme");
        return;
    }

    assert_eq!(calls.len(), 3);
    let backdrop = if request.backdrop_enabled {
        request.backdrop.value()
    } else {
        0
    };
    assert_eq!(
        calls[0],
        Call::Attribute(WindowAttribute::SystemBackdropType, backdrop)
    );
    assert_eq!(calls[1], theme);
    if request.transparency {
        assert!(matches!(calls[2], Call::Paint(_)));
    } else {
        assert_eq!(calls[2], Call::ClearKey);
    }

    // The last theme call decides the theme
    let last_theme = input.ops.iter().rev().find_map(|op| match op {
        Op::Dark => Some(true),
        Op::Light => Some(false),
        Op::Auto => Some(input.app_light == Some(0)),
        _ => None,
    });
    if let Some(dark) = last_theme {
        assert_eq!(request.dark, dark);
    }
});
