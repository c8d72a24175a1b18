use glazing_risk::assessment::{
    BatchEntry, BatchOutcome, FramingSystem, GlassPreset, GlazingConfiguration,
    InstallationLocation, RiskLevel, RiskReport, ThermalExposure,
};
use std::io::{self, Write};

fn level_tag(level: RiskLevel) -> String {
    format!("{} {}", level.label(), level.marker())
}

fn describe_configuration(configuration: &GlazingConfiguration) -> String {
    let mut parts = vec![format!("outer {}", configuration.outer().describe())];
    if let Some(inner) = configuration.inner() {
        parts.push(format!("inner {}", inner.describe()));
    }
    parts.push(configuration.location().label().to_string());
    parts.push(format!(
        "{:.2} m above floor",
        configuration.height_from_floor_m()
    ));
    parts.push(configuration.framing().label().to_string());
    parts.push(configuration.thermal_exposure().label().to_string());
    if configuration.pedestrian_access_below() {
        parts.push("pedestrian access below".to_string());
    }
    if configuration.critical_use_area() {
        parts.push("critical use area".to_string());
    }
    parts.join(" | ")
}

pub(crate) fn render_report(
    out: &mut impl Write,
    configuration: &GlazingConfiguration,
    report: &RiskReport,
) -> io::Result<()> {
    writeln!(out, "Glazing risk assessment")?;
    writeln!(out, "Configuration: {}", describe_configuration(configuration))?;

    for verdict in report.verdicts() {
        writeln!(out)?;
        writeln!(out, "{}: {}", verdict.category.title(), level_tag(verdict.level))?;
        writeln!(out, "  Why: {}", verdict.justification)?;
        writeln!(out, "  Mitigation: {}", verdict.mitigation)?;
    }

    writeln!(out)?;
    writeln!(out, "Overall: {} ({})", level_tag(report.overall()), report.summary())
}

pub(crate) fn render_batch(out: &mut impl Write, entries: &[BatchEntry]) -> io::Result<()> {
    writeln!(out, "Batch assessment ({} rows)", entries.len())?;

    let mut rejected = 0;
    for entry in entries {
        match &entry.outcome {
            BatchOutcome::Assessed { report } => writeln!(
                out,
                "- [row {}] {}: {} ({})",
                entry.row,
                entry.id,
                level_tag(report.overall()),
                report.summary()
            )?,
            BatchOutcome::Rejected { message, .. } => {
                rejected += 1;
                writeln!(out, "- [row {}] {}: rejected, {}", entry.row, entry.id, message)?
            }
        }
    }

    let mut counts = RiskLevel::ALL.map(|level| (level, 0usize));
    for report in entries.iter().filter_map(|entry| entry.outcome.report()) {
        if let Some((_, count)) = counts
            .iter_mut()
            .find(|(level, _)| *level == report.overall())
        {
            *count += 1;
        }
    }

    writeln!(out)?;
    let tally: Vec<String> = counts
        .iter()
        .map(|(level, count)| format!("{} {}", level.label(), count))
        .collect();
    writeln!(out, "Overall levels: {}", tally.join(" | "))?;
    writeln!(out, "Rejected rows: {rejected}")
}

pub(crate) fn render_vocabulary(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Glass presets (--glass, --inner-glass)")?;
    for preset in GlassPreset::ALL {
        writeln!(out, "  {:<28} {}", preset.key(), preset.label())?;
    }

    writeln!(out, "\nLocations (--location)")?;
    for location in InstallationLocation::ALL {
        writeln!(out, "  {}", location.label())?;
    }

    writeln!(out, "\nFraming (--framing)")?;
    for framing in FramingSystem::ALL {
        writeln!(out, "  {}", framing.label())?;
    }

    writeln!(out, "\nThermal exposure (--thermal-exposure)")?;
    for exposure in ThermalExposure::ALL {
        writeln!(out, "  {}", exposure.label())?;
    }

    Ok(())
}
