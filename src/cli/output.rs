//! Output formatting module
//!
//! This module handles formatting decoded dumps for the different output formats.

use crate::{
    Result,
    analysis::{Polarity, RankedWeight, TransitionGraph, top_state_features, top_transitions},
    dump::{Diagnostic, ParsedDump},
};
use serde_json::json;

/// Output a decoded dump as JSON
pub fn output_json(w: &mut impl std::io::Write, dump: &ParsedDump) -> Result<()> {
    let output = json!({
        "header": dump.header,
        "labels": dump.labels,
        "attributes": dump.attributes,
        "transitions": dump.transitions.iter().map(|((from, to), weight)| {
            json!({
                "from": from,
                "to": to,
                "weight": weight,
            })
        }).collect::<Vec<_>>(),
        "state_features": dump.state_features.iter().map(|((attribute, label), weight)| {
            json!({
                "attribute": attribute,
                "label": label,
                "weight": weight,
            })
        }).collect::<Vec<_>>(),
        "semi_markov": dump.semi_markov,
        "error_lines": dump.error_lines,
    });

    serde_json::to_writer_pretty(&mut *w, &output)?;
    writeln!(w)?; // Add trailing newline
    Ok(())
}

/// Output a decoded dump as text tables
pub fn output_table(w: &mut impl std::io::Write, dump: &ParsedDump) -> Result<()> {
    writeln!(w, "CRFsuite Model Dump")?;
    writeln!(w, "{}", "=".repeat(80))?;
    writeln!(w)?;

    writeln!(w, "Summary:")?;
    writeln!(w, "  Labels:          {}", dump.labels.len())?;
    writeln!(w, "  Attributes:      {}", dump.attributes.len())?;
    writeln!(w, "  Transitions:     {}", dump.transitions.len())?;
    writeln!(w, "  State Features:  {}", dump.state_features.len())?;
    writeln!(w, "  Forward States:  {}", dump.semi_markov.forward_state.len())?;
    writeln!(w, "  Skipped Lines:   {}", dump.error_lines.len())?;
    writeln!(w)?;

    if !dump.header.is_empty() {
        writeln!(w, "Header:")?;
        for (key, value) in &dump.header {
            writeln!(w, "  {:<20} {}", key, value)?;
        }
        writeln!(w)?;
    }

    if !dump.labels.is_empty() {
        writeln!(w, "Labels:")?;
        writeln!(w, "{:-<80}", "")?;
        writeln!(w, "{:>6}  {:<30} {:>12}", "ID", "Label", "Max Seg Len")?;
        writeln!(w, "{:-<80}", "")?;
        for (label, id) in dump.labels_by_id() {
            let max_seg_len = dump
                .semi_markov
                .max_seg_len
                .get(label)
                .map(|len| len.to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(w, "{:>6}  {:<30} {:>12}", id, label, max_seg_len)?;
        }
        writeln!(w)?;
    }

    if !dump.transitions.is_empty() {
        let graph = TransitionGraph::build_from_dump(dump);
        let stats = graph.stats();

        writeln!(w, "Transitions:")?;
        writeln!(w, "  Self Loops:      {}", stats.self_loops)?;
        if let Some((from, to, weight)) = &stats.strongest {
            writeln!(w, "  Strongest:       {} -> {} ({:.6})", from, to, weight)?;
        }
        if let Some((from, to, weight)) = &stats.weakest {
            writeln!(w, "  Weakest:         {} -> {} ({:.6})", from, to, weight)?;
        }
        writeln!(w, "{:-<80}", "")?;
        writeln!(w, "{:<30} {:<30} {:>12}", "From", "To", "Weight")?;
        writeln!(w, "{:-<80}", "")?;

        // Keys are ordered by source, so equal sources are adjacent
        let mut sources: Vec<&str> = dump
            .transitions
            .keys()
            .map(|(from, _)| from.as_str())
            .collect();
        sources.dedup();
        for from in sources {
            for (to, weight) in graph.outgoing(from) {
                writeln!(w, "{:<30} {:<30} {:>12.6}", from, to, weight)?;
            }
        }
        writeln!(w)?;
    }

    let sm = &dump.semi_markov;
    if !sm.is_empty() {
        writeln!(w, "Semi-Markov Model:")?;
        for (key, value) in &sm.scalars {
            writeln!(w, "  {:<20} {}", key, value)?;
        }
        if !sm.forward_state.is_empty() {
            writeln!(w, "{:-<80}", "")?;
            writeln!(
                w,
                "{:>6} {:>7} {:>7} {:>7}  {:<50}",
                "State", "Length", "Prefix", "Suffix", "Labels"
            )?;
            writeln!(w, "{:-<80}", "")?;
            for (index, state) in &sm.forward_state {
                writeln!(
                    w,
                    "{:>6} {:>7} {:>7} {:>7}  {:<50}",
                    index,
                    state.length,
                    state.prefix.len(),
                    state.suffix.len(),
                    state.labels.join("|")
                )?;
            }
        }
        writeln!(w)?;
    }

    Ok(())
}

/// Output the `n` strongest transitions and state features
pub fn output_top(w: &mut impl std::io::Write, dump: &ParsedDump, n: usize) -> Result<()> {
    write_transitions(
        w,
        "Top likely transitions:",
        &top_transitions(dump, n, Polarity::Positive),
    )?;
    write_transitions(
        w,
        "Top unlikely transitions:",
        &top_transitions(dump, n, Polarity::Negative),
    )?;
    write_state_features(
        w,
        "Top positive state features:",
        &top_state_features(dump, n, Polarity::Positive),
    )?;
    write_state_features(
        w,
        "Top negative state features:",
        &top_state_features(dump, n, Polarity::Negative),
    )?;
    Ok(())
}

fn write_transitions(
    w: &mut impl std::io::Write,
    title: &str,
    ranked: &[RankedWeight<'_>],
) -> Result<()> {
    writeln!(w, "{}", title)?;
    for entry in ranked {
        writeln!(
            w,
            "  {:<20} -> {:<20} {:>12.6}",
            entry.left, entry.right, entry.weight
        )?;
    }
    writeln!(w)?;
    Ok(())
}

fn write_state_features(
    w: &mut impl std::io::Write,
    title: &str,
    ranked: &[RankedWeight<'_>],
) -> Result<()> {
    writeln!(w, "{}", title)?;
    for entry in ranked {
        writeln!(
            w,
            "  {:>12.6} {:<12} {}",
            entry.weight, entry.right, entry.left
        )?;
    }
    writeln!(w)?;
    Ok(())
}

/// Output one entry per skipped line
pub fn output_diagnostics(w: &mut impl std::io::Write, diagnostics: &[Diagnostic]) -> Result<()> {
    for diagnostic in diagnostics {
        writeln!(w, "line {}: {}", diagnostic.line_number, diagnostic.error)?;
        writeln!(w, "    {}", diagnostic.line)?;
    }
    Ok(())
}
