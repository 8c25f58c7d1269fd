//! `pcraft platforms`: show the platform catalog.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};

use postcraft_types::platform::{CATALOG, PlatformSpec, SettingKind};

/// Print the catalog as a table, or as JSON.
pub fn list_platforms(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&CATALOG)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Platform").fg(Color::White),
        Cell::new("Links").fg(Color::White),
        Cell::new("Image size").fg(Color::White),
        Cell::new("Settings").fg(Color::White),
    ]);

    for spec in CATALOG.iter() {
        let links = if spec.allows_links {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no").fg(Color::DarkGrey)
        };
        table.add_row(vec![
            Cell::new(spec.platform.name()).fg(Color::Cyan),
            links,
            Cell::new(spec.recommended_image_size.unwrap_or("-")),
            Cell::new(settings_summary(spec)),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}

/// One line per setting: `id (options)` or `id (unit)`.
fn settings_summary(spec: &PlatformSpec) -> String {
    spec.settings
        .iter()
        .map(|s| match &s.kind {
            SettingKind::Select { options, .. } => format!("{} ({})", s.id, options.join("|")),
            SettingKind::Number { unit: Some(unit), .. } => format!("{} ({unit})", s.id),
            SettingKind::Number { unit: None, .. } => s.id.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
