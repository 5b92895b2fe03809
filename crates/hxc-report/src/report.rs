//! Full HXC Stats report: by-player, death and by-class sections.
//!
//! Text and JSON output share one [`analyze`] pass. Text sections are written
//! straight to the output, so an I/O failure part-way leaves the earlier
//! sections printed.

use std::io::Write;

use hxc_core::error::Result;
use hxc_core::models::RecordStore;
use hxc_core::settings::Section;
use hxc_data::analysis::{analyze, ClassStats, DeathStats, PlayerStats};
use tracing::debug;

use crate::table_view::{render_table, ValueStyle};

pub const NC_TITLE: &str = "NC (Number of Characters)";
pub const GLG_TITLE: &str = "GLG (Gross Levels Gained)";
pub const HLC_TITLE: &str = "HCL (Highest Character Level)";
pub const ACL_TITLE: &str = "ACL (Average Character Life)";
pub const MDL_TITLE: &str = "MDL (Mean Death Level)";
pub const SURVIVAL_TITLE: &str = "Survival Rate By Class";

// ── Text ──────────────────────────────────────────────────────────────────────

/// Write the selected sections of the text report, in report order.
pub fn write_text_report<W: Write + ?Sized>(
    out: &mut W,
    store: &RecordStore,
    sections: &[Section],
) -> Result<()> {
    let analysis = analyze(store, sections);
    if let Some(player) = &analysis.player {
        debug!("Rendering {} section", Section::Player);
        write_player_section(out, player)?;
    }
    if let Some(death) = &analysis.death {
        debug!("Rendering {} section", Section::Death);
        write_death_section(out, death)?;
    }
    if let Some(class) = &analysis.class {
        debug!("Rendering {} section", Section::Class);
        write_class_section(out, class)?;
    }
    out.flush()?;
    Ok(())
}

/// The five by-player tables.
pub fn write_player_section<W: Write + ?Sized>(out: &mut W, stats: &PlayerStats) -> Result<()> {
    render_table(out, NC_TITLE, &stats.number_of_characters, ValueStyle::Integer)?;
    render_table(out, GLG_TITLE, &stats.gross_levels_gained, ValueStyle::Integer)?;
    render_table(out, HLC_TITLE, &stats.highest_character_level, ValueStyle::Integer)?;
    render_table(out, ACL_TITLE, &stats.average_character_life, ValueStyle::Integer)?;
    render_table(out, MDL_TITLE, &stats.mean_death_level, ValueStyle::Integer)?;
    Ok(())
}

/// The cause-of-death table followed by the dead-to-living ratio line.
pub fn write_death_section<W: Write + ?Sized>(out: &mut W, stats: &DeathStats) -> Result<()> {
    let title = format!("Cause of Death ({})", stats.total_deaths);
    render_table(out, &title, &stats.causes, ValueStyle::Integer)?;
    writeln!(out, "\nDead-to-Living Ratio: {}", stats.dead_to_living_ratio())?;
    writeln!(out, "\n")?;
    Ok(())
}

/// The survival-rate-by-class table.
pub fn write_class_section<W: Write + ?Sized>(out: &mut W, stats: &ClassStats) -> Result<()> {
    render_table(out, SURVIVAL_TITLE, &stats.survival_rate, ValueStyle::Percentage)?;
    Ok(())
}

// ── JSON ──────────────────────────────────────────────────────────────────────

/// Write the selected sections as pretty-printed JSON.
pub fn write_json_report<W: Write + ?Sized>(
    out: &mut W,
    store: &RecordStore,
    sections: &[Section],
) -> Result<()> {
    let analysis = analyze(store, sections);
    serde_json::to_writer_pretty(&mut *out, &analysis)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
