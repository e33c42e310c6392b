//! Prints the current personalization state and the available backdrops.

use fluent_backdrop::codec::BackdropKind;

#[cfg(windows)]
fn main() {
    use fluent_backdrop::registry::CurrentUserRegistry;
    use fluent_backdrop::theme::ThemeQuery;

    env_logger::init();

    println!("Fluent Backdrop Demo\n");

    println!("=== Personalization ===");
    let snapshot = ThemeQuery::new(CurrentUserRegistry).snapshot();
    println!("{}", snapshot);
    if let Some(accent) = snapshot.accent {
        let shade = if accent.is_light() { "light" } else { "dark" };
        println!("Accent reads as {}", shade);
    }
    println!();

    print_backdrops();
}

#[cfg(not(windows))]
fn main() {
    env_logger::init();

    println!("Fluent Backdrop Demo\n");
    println!("Personalization is only available on Windows.\n");
    print_backdrops();
}

fn print_backdrops() {
    println!("=== Backdrops ===");
    for kind in BackdropKind::ALL {
        println!("{:>8} ({}): {}", kind.name(), kind.value(), kind.description());
    }
}
