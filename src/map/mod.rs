//! Map widget contract
//!
//! The dashboard only needs two things from a map: something that draws a
//! center point and a set of markers, and a stream of click positions.

mod terminal;

pub use terminal::{spawn_stdin_clicks, TerminalMap};

use dashboard_shared::{Marker, Position};

/// Something that can draw the dashboard markers
pub trait MapView: Send {
    fn render(&mut self, center: Position, markers: &[Marker]);
}

/// One click on the map surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapClick {
    pub position: Position,
}

/// Parse a click typed as `lat long` or `lat,long`
pub fn parse_click(line: &str) -> Option<MapClick> {
    let mut parts = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty());

    let latitude = parts.next()?.parse::<f64>().ok()?;
    let longitude = parts.next()?.parse::<f64>().ok()?;
    if parts.next().is_some() || !latitude.is_finite() || !longitude.is_finite() {
        return None;
    }

    Some(MapClick {
        position: Position::new(latitude, longitude),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_click() {
        let expected = Some(MapClick {
            position: Position::new(53.1, 23.1),
        });
        assert_eq!(parse_click("53.1 23.1"), expected);
        assert_eq!(parse_click("53.1,23.1"), expected);
        assert_eq!(parse_click("  53.1 ,  23.1 \n"), expected);
    }

    #[test]
    fn test_parse_click_rejects_garbage() {
        assert_eq!(parse_click(""), None);
        assert_eq!(parse_click("53.1"), None);
        assert_eq!(parse_click("north east"), None);
        assert_eq!(parse_click("1 2 3"), None);
        assert_eq!(parse_click("NaN 2"), None);
    }
}
