//! Interactive map session.
//!
//! A line-oriented stand-in for the map page: each input line is one event.
//! Known commands drive the view directly; anything else is chat, displayed
//! and run through the command grammar.

use std::io::{self, BufRead, Write};

use console::style;

use crate::chat::ChatMessage;
use crate::config::{parse_position, Settings};
use crate::controller::{ChatEffect, MapController, SearchOutcome};
use crate::geo::LatLon;
use crate::locate::FixedLocator;
use crate::models::FilterTag;
use crate::surface::{HeadlessSurface, MapSurface};

use super::commands::backend;

const HELP: &str = "\
Commands:
  search <text>        look up a place and recenter on it
  goto <lat> <lon> [z] move the view
  filter +<tag>        enable a filter (historical|natural|cultural)
  filter -<tag>        disable a filter
  filters              show filter state
  markers              list landmarks in view
  info <n>             select marker n and show its details
  route                route from your position to the selected landmark
  where                show the current view and your position
  history              show the chat transcript
  help                 this text
  quit                 leave
Anything else is sent as chat and may steer the map
(\"center the map on X\", \"add natural filter\", ...).";

pub async fn cmd_explore(settings: &Settings, at: Option<&str>) -> anyhow::Result<()> {
    let surface = HeadlessSurface::new(settings.view.center(), settings.view.zoom);
    let mut controller = MapController::new(surface, backend(settings)?);

    // CLI stand-in for the geolocation prompt: a fixed position from the
    // flag or config. Absent position falls back to the default view.
    let position = at
        .and_then(parse_position)
        .or_else(|| settings.position.fixed_position());
    let locator = position.map(FixedLocator::new);
    controller
        .bootstrap(
            locator.as_ref().map(|l| l as &dyn crate::locate::Locator),
            settings.position.timeout(),
        )
        .await;

    println!("{}", style("waymark explore").bold());
    println!("{HELP}\n");
    print_view(&controller);
    print_markers(&controller);

    let mut history: Vec<ChatMessage> = Vec::new();
    let stdin = io::stdin();
    loop {
        print!("{} ", style(">").cyan());
        io::stdout().flush()?;

        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut words = input.split_whitespace();
        match words.next() {
            Some("quit") | Some("exit") => break,
            Some("help") => println!("{HELP}"),
            Some("search") => {
                let query = input.strip_prefix("search").unwrap_or("").trim();
                let outcome = controller.search(query).await;
                print_search_outcome(&controller, &outcome);
            }
            Some("goto") => {
                let lat = words.next().and_then(|w| w.parse::<f64>().ok());
                let lon = words.next().and_then(|w| w.parse::<f64>().ok());
                let zoom = words
                    .next()
                    .and_then(|w| w.parse::<u8>().ok())
                    .unwrap_or_else(|| controller.surface().zoom());
                match (lat, lon) {
                    (Some(lat), Some(lon)) => {
                        controller.move_view(LatLon::new(lat, lon), zoom).await;
                        print_view(&controller);
                        print_markers(&controller);
                    }
                    _ => println!("usage: goto <lat> <lon> [zoom]"),
                }
            }
            Some("filter") => match words.next().map(parse_filter_toggle) {
                Some(Some((tag, enabled))) => {
                    controller.set_filter(tag, enabled).await;
                    print_filters(&controller);
                    print_markers(&controller);
                }
                _ => println!("usage: filter +<tag> or filter -<tag>"),
            },
            Some("filters") => print_filters(&controller),
            Some("markers") => print_markers(&controller),
            Some("info") => {
                let index = words.next().and_then(|w| w.parse::<usize>().ok());
                match index.and_then(|n| controller.landmarks().nth(n.checked_sub(1)?).cloned()) {
                    Some(landmark) => {
                        controller.select_landmark(&landmark.pageid).await;
                        print_detail(&controller);
                    }
                    None => println!("usage: info <marker number>"),
                }
            }
            Some("route") => {
                if controller.route_to_selected().await {
                    let surface = controller.surface();
                    let points = surface.route().map(|r| r.len()).unwrap_or(0);
                    println!(
                        "{} route drawn ({points} points), view framed at {}",
                        style("✓").green(),
                        surface.center()
                    );
                } else {
                    println!(
                        "{} No route. Set a position (--at) and select a landmark first.",
                        style("!").yellow()
                    );
                }
            }
            Some("where") => print_view(&controller),
            Some("history") => {
                for message in &history {
                    println!("{} {}", style(format!("{}:", message.sender)).bold(), message.text);
                }
            }
            _ => {
                // Chat fall-through: display, then interpret.
                history.push(ChatMessage {
                    sender: "You".to_string(),
                    text: input.to_string(),
                });
                println!("{} {input}", style("You:").bold());
                match controller.handle_chat(input).await {
                    Some(ChatEffect::Search(outcome)) => {
                        print_search_outcome(&controller, &outcome)
                    }
                    Some(ChatEffect::FiltersChanged) => {
                        print_filters(&controller);
                        print_markers(&controller);
                    }
                    None => {}
                }
            }
        }
    }

    Ok(())
}

fn parse_filter_toggle(word: &str) -> Option<(FilterTag, bool)> {
    if let Some(name) = word.strip_prefix('+') {
        FilterTag::from_str(name).map(|tag| (tag, true))
    } else if let Some(name) = word.strip_prefix('-') {
        FilterTag::from_str(name).map(|tag| (tag, false))
    } else {
        None
    }
}

fn print_view<S: MapSurface>(controller: &MapController<S>) {
    let surface = controller.surface();
    print!(
        "view: {} at zoom {}",
        surface.center(),
        surface.zoom()
    );
    match controller.user_position() {
        Some(position) => println!(", you are at {position}"),
        None => println!(),
    }
}

fn print_markers<S: MapSurface>(controller: &MapController<S>) {
    let count = controller.landmarks().count();
    if count == 0 {
        println!("{}", style("no landmarks in view").dim());
        return;
    }
    for (index, landmark) in controller.landmarks().enumerate() {
        println!(
            "{:>3}. {} {}",
            index + 1,
            landmark.title,
            style(format!("[{}]", landmark.kind)).dim()
        );
    }
}

fn print_filters<S: MapSurface>(controller: &MapController<S>) {
    let parts: Vec<String> = FilterTag::ALL
        .iter()
        .map(|tag| {
            if controller.filters().contains(tag) {
                format!("[x] {tag}")
            } else {
                format!("[ ] {tag}")
            }
        })
        .collect();
    println!("{}", parts.join("  "));
}

fn print_detail<S: MapSurface>(controller: &MapController<S>) {
    match controller.detail() {
        Some(detail) => {
            println!("{}", style(&detail.title).bold());
            println!("{}", detail.extract);
        }
        None => println!("{}", style("no details available").dim()),
    }
}

fn print_search_outcome<S: MapSurface>(controller: &MapController<S>, outcome: &SearchOutcome) {
    match outcome {
        SearchOutcome::Recentered { display_name } => {
            match display_name {
                Some(name) => println!("{} {name}", style("✓").green()),
                None => println!("{} recentered", style("✓").green()),
            }
            print_view(controller);
            print_markers(controller);
        }
        SearchOutcome::NotFound => println!(
            "{} Location not found. Please try a different search term.",
            style("!").yellow()
        ),
        SearchOutcome::Failed => println!(
            "{} An error occurred while searching. Please try again.",
            style("✗").red()
        ),
        SearchOutcome::Empty => {}
    }
}
