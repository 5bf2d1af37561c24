/*!
 * Meta-Data Parser
 * Turns program meta-data into a workload of processes in the Enter state
 */

use crate::core::errors::MetadataError;
use crate::core::types::{Cycles, Pid};
use crate::process::{Action, ActionKind, Pcb, Resource};

const START_MARKER: &str = "Start Program Meta-Data Code";
const END_MARKER: &str = "End Program Meta-Data Code";

/// One `<code>(<descriptor>)<cycles>` token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawAction<'a> {
    code: char,
    descriptor: &'a str,
    cycles: Cycles,
}

impl<'a> RawAction<'a> {
    fn parse(token: &'a str) -> Result<Self, MetadataError> {
        let malformed = || MetadataError::MalformedAction(token.to_string());

        let mut chars = token.chars();
        let code = chars.next().ok_or_else(malformed)?;
        let rest = chars.as_str().trim_start();
        let rest = rest.strip_prefix('(').ok_or_else(malformed)?;
        let (descriptor, cycles) = rest.split_once(')').ok_or_else(malformed)?;

        let cycles = cycles.trim();
        if cycles.is_empty() {
            return Err(malformed());
        }
        let cycles = cycles
            .parse::<Cycles>()
            .map_err(|_| MetadataError::InvalidCycles(token.to_string()))?;

        Ok(Self {
            code: code.to_ascii_uppercase(),
            descriptor: descriptor.trim(),
            cycles,
        })
    }
}

/// Body between the start and end marker lines
fn body(text: &str) -> Result<&str, MetadataError> {
    let text = text.trim();
    let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
    if !first.trim().to_ascii_lowercase().starts_with(&START_MARKER.to_ascii_lowercase()) {
        return Err(MetadataError::MissingMarker("start"));
    }

    let (body, footer) = rest
        .rsplit_once('\n')
        .map_or(("", rest), |(body, footer)| (body, footer));
    if !footer.trim().to_ascii_lowercase().starts_with(&END_MARKER.to_ascii_lowercase()) {
        return Err(MetadataError::MissingMarker("end"));
    }
    Ok(body)
}

/// Parse meta-data text into processes numbered from 1 in file order
pub fn parse_metadata(text: &str) -> Result<Vec<Pcb>, MetadataError> {
    let mut tokens = body(text)?
        .split(|c| c == ';' || c == '.')
        .map(str::trim)
        .filter(|t| !t.is_empty());

    match tokens.next().map(RawAction::parse).transpose()? {
        Some(RawAction {
            code: 'S',
            descriptor: "start",
            ..
        }) => {}
        _ => return Err(MetadataError::MissingSimulatorStart),
    }

    let mut processes: Vec<Pcb> = Vec::new();
    let mut current: Option<Pcb> = None;
    let mut ended = false;

    for token in tokens.by_ref() {
        let raw = RawAction::parse(token)?;
        let next_pid = processes.len() as Pid + 1;

        match (raw.code, raw.descriptor) {
            ('S', "end") => {
                if let Some(open) = current.take() {
                    return Err(MetadataError::ProcessBounds(open.pid()));
                }
                ended = true;
                break;
            }
            ('S', _) => return Err(MetadataError::MalformedAction(token.to_string())),
            ('A', "start") => {
                if let Some(open) = current.take() {
                    return Err(MetadataError::ProcessBounds(open.pid()));
                }
                let mut pcb = Pcb::new(next_pid);
                pcb.push_action(Action::new(next_pid, ActionKind::ProcessStart, raw.cycles));
                current = Some(pcb);
            }
            ('A', "end") => {
                let mut pcb = current
                    .take()
                    .ok_or(MetadataError::ProcessBounds(next_pid))?;
                let pid = pcb.pid();
                pcb.push_action(Action::new(pid, ActionKind::ProcessEnd, raw.cycles));
                processes.push(pcb);
            }
            ('A', other) => return Err(MetadataError::UnknownDescriptor(other.to_string())),
            (code @ ('P' | 'I' | 'O'), descriptor) => {
                let resource: Resource = descriptor
                    .parse()
                    .map_err(MetadataError::UnknownDescriptor)?;
                let pcb = current
                    .as_mut()
                    .ok_or_else(|| MetadataError::OrphanAction(token.to_string()))?;
                let kind = match code {
                    'P' => ActionKind::Compute(resource),
                    'I' => ActionKind::Input(resource),
                    _ => ActionKind::Output(resource),
                };
                let pid = pcb.pid();
                pcb.push_action(Action::new(pid, kind, raw.cycles));
            }
            (code, _) => return Err(MetadataError::UnknownActionCode(code)),
        }
    }

    if !ended {
        return Err(MetadataError::MissingSimulatorEnd);
    }
    if let Some(trailing) = tokens.next() {
        return Err(MetadataError::MalformedAction(trailing.to_string()));
    }
    if processes.is_empty() {
        return Err(MetadataError::Empty);
    }
    Ok(processes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessState;

    #[test]
    fn test_token_shapes() {
        let raw = RawAction::parse("I(hard drive)13").unwrap();
        assert_eq!(raw.code, 'I');
        assert_eq!(raw.descriptor, "hard drive");
        assert_eq!(raw.cycles, 13);

        assert!(matches!(
            RawAction::parse("P(run)"),
            Err(MetadataError::MalformedAction(_))
        ));
        assert!(matches!(
            RawAction::parse("P(run)-4"),
            Err(MetadataError::InvalidCycles(_))
        ));
        assert!(matches!(
            RawAction::parse("Prun)4"),
            Err(MetadataError::MalformedAction(_))
        ));
    }

    #[test]
    fn test_single_process() {
        let text = "Start Program Meta-Data Code:\n\
                    S(start)0; A(start)0; P(run)5; O(printer)2; A(end)0; S(end)0.\n\
                    End Program Meta-Data Code.";
        let workload = parse_metadata(text).unwrap();

        assert_eq!(workload.len(), 1);
        let pcb = &workload[0];
        assert_eq!(pcb.pid(), 1);
        assert_eq!(pcb.state(), ProcessState::Enter);
        let kinds: Vec<_> = pcb.actions().iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ActionKind::ProcessStart,
                ActionKind::Compute(Resource::Run),
                ActionKind::Output(Resource::Printer),
                ActionKind::ProcessEnd,
            ]
        );
    }

    #[test]
    fn test_bounds_errors() {
        let unterminated = "Start Program Meta-Data Code:\n\
                            S(start)0; A(start)0; P(run)5; S(end)0.\n\
                            End Program Meta-Data Code.";
        assert!(matches!(
            parse_metadata(unterminated),
            Err(MetadataError::ProcessBounds(1))
        ));

        let orphan = "Start Program Meta-Data Code:\n\
                      S(start)0; P(run)5; S(end)0.\n\
                      End Program Meta-Data Code.";
        assert!(matches!(
            parse_metadata(orphan),
            Err(MetadataError::OrphanAction(_))
        ));

        let no_os_start = "Start Program Meta-Data Code:\n\
                           A(start)0; A(end)0; S(end)0.\n\
                           End Program Meta-Data Code.";
        assert!(matches!(
            parse_metadata(no_os_start),
            Err(MetadataError::MissingSimulatorStart)
        ));
    }
}
