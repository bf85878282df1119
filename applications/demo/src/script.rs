/// Page script parsing
///
/// A script is a comma-separated list of steps:
///
/// - `<player>:<control>` activates a button (`play`, `pause`, `toggle`,
///   `forward`, `back`)
/// - `<player>:seek:<fraction>` seeks directly
/// - `<player>:click:<x>` clicks the progress track at pixel `x`
/// - `<player>:load` finishes loading the player's media
/// - `tick:<seconds>` lets time pass on every player
use crate::error::{DemoError, Result};
use duet_controls::ControlId;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Step {
    Activate { player: String, control: ControlId },
    Seek { player: String, fraction: f64 },
    Click { player: String, x: f64 },
    Load { player: String },
    Tick { seconds: f64 },
}

pub fn parse_script(script: &str) -> Result<Vec<Step>> {
    script
        .split(',')
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(parse_step)
        .collect()
}

pub fn parse_step(step: &str) -> Result<Step> {
    let parts: Vec<&str> = step.split(':').map(str::trim).collect();

    match parts.as_slice() {
        ["tick", seconds] => {
            let seconds = number(step, seconds)?;
            if seconds < 0.0 {
                return Err(DemoError::script(step, "time cannot run backwards"));
            }
            Ok(Step::Tick { seconds })
        }
        [player, "seek", fraction] => Ok(Step::Seek {
            player: (*player).to_string(),
            fraction: number(step, fraction)?,
        }),
        [player, "click", x] => Ok(Step::Click {
            player: (*player).to_string(),
            x: number(step, x)?,
        }),
        [player, "load"] => Ok(Step::Load {
            player: (*player).to_string(),
        }),
        [player, control] => {
            let control = ControlId::from_name(control)
                .filter(|id| *id != ControlId::Progress)
                .ok_or_else(|| DemoError::script(step, format!("unknown control '{}'", control)))?;
            Ok(Step::Activate {
                player: (*player).to_string(),
                control,
            })
        }
        _ => Err(DemoError::script(step, "expected <player>:<action>")),
    }
}

fn number(step: &str, text: &str) -> Result<f64> {
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| DemoError::script(step, format!("'{}' is not a number", text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_step_kind() {
        let steps = parse_script("first:play, tick:2.5, second:seek:0.5, first:click:100, second:load, first:toggle").unwrap();

        assert_eq!(
            steps,
            vec![
                Step::Activate {
                    player: "first".to_string(),
                    control: ControlId::Play
                },
                Step::Tick { seconds: 2.5 },
                Step::Seek {
                    player: "second".to_string(),
                    fraction: 0.5
                },
                Step::Click {
                    player: "first".to_string(),
                    x: 100.0
                },
                Step::Load {
                    player: "second".to_string()
                },
                Step::Activate {
                    player: "first".to_string(),
                    control: ControlId::PlayPause
                },
            ]
        );
    }

    #[test]
    fn empty_script_has_no_steps() {
        assert!(parse_script("").unwrap().is_empty());
        assert!(parse_script(" , ,").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_steps() {
        assert!(parse_step("first").is_err());
        assert!(parse_step("first:rewind").is_err());
        assert!(parse_step("first:progress").is_err());
        assert!(parse_step("first:seek:half").is_err());
        assert!(parse_step("tick:-1").is_err());
        assert!(parse_step("tick:NaN").is_err());
        assert!(parse_step("a:b:c:d").is_err());
    }
}
