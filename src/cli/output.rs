//! Output formatting module
//!
//! This module formats replay summaries and motion frame tables.

use crate::{
    Result,
    clock::{format_delta, format_ticks},
    input::{Action, Facing, InputFrame},
    monitor::SessionLog,
};
use serde_json::json;
use std::path::Path;

/// Output a replay summary as JSON
pub fn output_json(
    w: &mut impl std::io::Write,
    source: &Path,
    log: &SessionLog,
    written: usize,
) -> Result<()> {
    let output = json!({
        "source": source.display().to_string(),
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "summary": {
            "ticks": log.ticks,
            "frames": format_ticks(log.ticks),
            "advantages": log.advantages.len(),
            "dispatches": log.dispatches.len(),
            "failed_dispatches": log.failed_dispatches,
            "cancelled_delays": log.cancelled_delays,
            "aborted": log.aborted,
            "timed_out": log.timed_out,
            "masks_written": written,
        },
        "advantages": log.advantages.iter().map(|report| {
            json!({
                "defender": report.defender,
                "attacker": report.attacker,
                "start": report.start,
                "resolved_at": report.resolved_at,
                "defender_advantage_ticks": report.defender_advantage(),
                "defender_advantage_frames": format_delta(report.defender_advantage()),
                "rg_type": report.rg_type.map(|rg| rg.name()),
                "rg_full_stun_frames": report.rg_full_stun_advantage().map(format_delta),
            })
        }).collect::<Vec<_>>(),
        "dispatches": log.dispatches.iter().map(|record| {
            json!({
                "tick": record.tick,
                "player": record.player,
                "trigger": record.kind.name(),
                "action": record.action.to_string(),
            })
        }).collect::<Vec<_>>(),
    });

    serde_json::to_writer_pretty(&mut *w, &output)?;
    writeln!(w)?; // Add trailing newline
    Ok(())
}

/// Output a replay summary as text table
pub fn output_table(
    w: &mut impl std::io::Write,
    source: &Path,
    log: &SessionLog,
    written: usize,
) -> Result<()> {
    writeln!(w, "Frame Monitor - Replay Results")?;
    writeln!(w, "{}", "=".repeat(80))?;
    writeln!(w)?;

    writeln!(w, "Summary:")?;
    writeln!(w, "  Source:             {}", source.display())?;
    writeln!(w, "  Ticks:              {} ({}f)", log.ticks, format_ticks(log.ticks))?;
    writeln!(w, "  Advantage reports:  {}", log.advantages.len())?;
    writeln!(w, "  Dispatches:         {}", log.dispatches.len())?;
    writeln!(w, "  Failed dispatches:  {}", log.failed_dispatches)?;
    writeln!(w, "  Cancelled delays:   {}", log.cancelled_delays)?;
    writeln!(w, "  Aborted / timed out: {} / {}", log.aborted, log.timed_out)?;
    writeln!(w, "  Masks written:      {}", written)?;
    writeln!(w)?;

    if !log.advantages.is_empty() {
        writeln!(w, "Advantage:")?;
        writeln!(w, "{:-<80}", "")?;
        writeln!(w, "{:>8} {:>8} {:<4} {:>8} {:<48}", "Start", "End", "Def", "Frames", "Result")?;
        writeln!(w, "{:-<80}", "")?;

        for report in &log.advantages {
            writeln!(
                w,
                "{:>8} {:>8} {:<4} {:>8} {:<48}",
                report.start,
                report.resolved_at,
                report.defender,
                format_delta(report.defender_advantage()),
                report.describe()
            )?;
        }
        writeln!(w)?;
    }

    if !log.dispatches.is_empty() {
        writeln!(w, "Dispatches:")?;
        writeln!(w, "{:-<80}", "")?;
        writeln!(w, "{:>8} {:<4} {:<16} {:<48}", "Tick", "Who", "Trigger", "Action")?;
        writeln!(w, "{:-<80}", "")?;

        for record in &log.dispatches {
            writeln!(
                w,
                "{:>8} {:<4} {:<16} {:<48}",
                record.tick,
                record.player,
                record.kind.name(),
                record.action.to_string()
            )?;
        }
        writeln!(w)?;
    }

    Ok(())
}

/// Output the frames of one action
pub fn output_motion(
    w: &mut impl std::io::Write,
    action: &Action,
    frames: &[InputFrame],
    facing: Facing,
) -> Result<()> {
    writeln!(w, "{} facing {:?}", action, facing)?;
    writeln!(w, "{:-<48}", "")?;
    writeln!(
        w,
        "{:>3} {:>4} {:<7} {:>6} {:>6} {:>6}",
        "#", "Dir", "Buttons", "Ticks", "Start", "Mask"
    )?;
    writeln!(w, "{:-<48}", "")?;

    let mut start = 0u32;
    for (i, frame) in frames.iter().enumerate() {
        let mask = frame.to_mask(facing);
        writeln!(
            w,
            "{:>3} {:>4} {:<7} {:>6} {:>6} {:02x}:{:02x}",
            i,
            frame.direction,
            frame.buttons.to_string(),
            frame.duration_ticks,
            start,
            mask.direction,
            mask.buttons
        )?;
        start += frame.duration_ticks;
    }
    writeln!(w, "{:-<48}", "")?;
    writeln!(w, "Total: {} ticks ({}f)", start, format_ticks(start as u64))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::RgType;
    use crate::host::Player;
    use crate::input::{Button, SpecialMotion, motion};
    use crate::matchup::AdvantageReport;
    use crate::monitor::DispatchRecord;
    use crate::trigger::TriggerKind;

    fn create_test_log() -> SessionLog {
        SessionLog {
            ticks: 300,
            advantages: vec![
                AdvantageReport {
                    attacker: Player::P1,
                    defender: Player::P2,
                    start: 100,
                    resolved_at: 145,
                    attacker_actionable: 130,
                    defender_actionable: 145,
                    rg_type: None,
                },
                AdvantageReport {
                    attacker: Player::P1,
                    defender: Player::P2,
                    start: 200,
                    resolved_at: 275,
                    attacker_actionable: 275,
                    defender_actionable: 260,
                    rg_type: Some(RgType::Stand),
                },
            ],
            dispatches: vec![DispatchRecord {
                tick: 145,
                player: Player::P2,
                kind: TriggerKind::AfterBlock,
                action: Action::Special {
                    motion: SpecialMotion::Dp,
                    button: Button::C,
                },
            }],
            ..SessionLog::default()
        }
    }

    #[test]
    fn test_output_json() {
        let mut output = Vec::new();
        output_json(&mut output, Path::new("session.jsonl"), &create_test_log(), 12).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["summary"]["advantages"], 2);
        assert_eq!(value["summary"]["masks_written"], 12);
        assert_eq!(value["advantages"][0]["defender_advantage_frames"], "-5");
        assert_eq!(value["advantages"][1]["rg_type"], "standing");
        assert_eq!(value["dispatches"][0]["action"], "623C");
    }

    #[test]
    fn test_output_table() {
        let mut output = Vec::new();
        output_table(&mut output, Path::new("session.jsonl"), &create_test_log(), 12).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("P2 -5 on block (P1 +5)"));
        assert!(text.contains("after-block"));
    }

    #[test]
    fn test_output_motion() {
        let action = Action::Special {
            motion: SpecialMotion::Qcf,
            button: Button::A,
        };
        let frames = motion::build(&action).unwrap();
        let mut output = Vec::new();
        output_motion(&mut output, &action, &frames, Facing::Left).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("236A facing Left"));
        assert!(text.contains(&format!("Total: {} ticks", motion::total_ticks(&frames))));
    }
}
