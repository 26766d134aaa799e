//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use swimlane_protocol::{RenderCommand, TextAlign, ThemeToken};

const BADGE_HEIGHT: f64 = 16.0;
const BADGE_CHAR_WIDTH: f64 = 6.5;

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions.
/// `dark` selects the color palette.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, dark: bool) -> String {
    let mut svg = String::with_capacity(commands.len() * 160);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif;font-size:12px">"#,
    ));

    let bg = resolve_color(ThemeToken::Background, dark);
    svg.push_str(&format!(
        r#"<rect width="{width}" height="{height}" fill="{bg}"/>"#,
    ));

    for cmd in commands {
        match cmd {
            RenderCommand::BeginGroup { id, label } => {
                svg.push_str(&format!(r#"<g data-id="{}">"#, escape_xml(id)));
                if let Some(label) = label {
                    svg.push_str(&format!("<title>{}</title>", escape_xml(label)));
                }
            }
            RenderCommand::EndGroup => svg.push_str("</g>"),
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width: line_width,
            } => {
                let stroke = resolve_color(*color, dark);
                if from.x == to.x {
                    svg.push_str(&format!(
                        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{stroke}" stroke-width="{line_width}"/>"#,
                        from.x, from.y, to.x, to.y,
                    ));
                } else {
                    // Lane changes bend halfway down.
                    let mid = (from.y + to.y) / 2.0;
                    svg.push_str(&format!(
                        r#"<path d="M{} {} C{} {mid} {} {mid} {} {}" fill="none" stroke="{stroke}" stroke-width="{line_width}"/>"#,
                        from.x, from.y, from.x, to.x, to.x, to.y,
                    ));
                }
            }
            RenderCommand::DrawNode {
                center,
                radius,
                color,
                ..
            } => {
                let fill = resolve_color(*color, dark);
                let ring = resolve_color(ThemeToken::Background, dark);
                svg.push_str(&format!(
                    r#"<circle cx="{}" cy="{}" r="{radius}" fill="{fill}" stroke="{ring}" stroke-width="2"/>"#,
                    center.x, center.y,
                ));
            }
            RenderCommand::DrawText {
                text,
                position,
                color,
                font_size,
                align,
            } => {
                let fill = resolve_color(*color, dark);
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                svg.push_str(&format!(
                    r#"<text x="{}" y="{}" fill="{fill}" font-size="{font_size}" text-anchor="{anchor}">{}</text>"#,
                    position.x,
                    position.y,
                    escape_xml(text),
                ));
            }
            RenderCommand::DrawBadge {
                position,
                text,
                color,
            } => {
                let fill = resolve_color(*color, dark);
                let text_color = resolve_color(ThemeToken::Background, dark);
                let w = text.chars().count() as f64 * BADGE_CHAR_WIDTH + 10.0;
                let y = position.y - BADGE_HEIGHT * 0.75;
                svg.push_str(&format!(
                    r#"<rect x="{}" y="{y}" width="{w}" height="{BADGE_HEIGHT}" rx="8" fill="{fill}"/>"#,
                    position.x,
                ));
                svg.push_str(&format!(
                    r#"<text x="{}" y="{}" fill="{text_color}" font-size="11">{}</text>"#,
                    position.x + 5.0,
                    position.y,
                    escape_xml(text),
                ));
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    if dark {
        match token {
            ThemeToken::LaneBlue => "#7dc2ff",
            ThemeToken::LaneOrange => "#ffa17d",
            ThemeToken::LaneGreen => "#89f7c5",
            ThemeToken::LaneYellow => "#f9c43f",
            ThemeToken::LanePurple => "#c8a6ff",
            ThemeToken::BadgeHead => "#ffa17d",
            ThemeToken::BadgeBranch => "#7dc2ff",
            ThemeToken::BadgeTag => "#f9c43f",
            ThemeToken::TextPrimary => "#ececec",
            ThemeToken::TextSecondary => "#bdbdbd",
            ThemeToken::TextMuted => "#9e9e9e",
            ThemeToken::Background => "#181818",
        }
    } else {
        match token {
            ThemeToken::LaneBlue => "#1f78c1",
            ThemeToken::LaneOrange => "#d9622b",
            ThemeToken::LaneGreen => "#1e9e6a",
            ThemeToken::LaneYellow => "#b58900",
            ThemeToken::LanePurple => "#7b4fc9",
            ThemeToken::BadgeHead => "#d9622b",
            ThemeToken::BadgeBranch => "#1f78c1",
            ThemeToken::BadgeTag => "#b58900",
            ThemeToken::TextPrimary => "#1a1a2e",
            ThemeToken::TextSecondary => "#444455",
            ThemeToken::TextMuted => "#666677",
            ThemeToken::Background => "#ffffff",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
