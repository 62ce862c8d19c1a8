//! Line-oriented input-file parser (§6): `P`/`A`/`D` tagged records.

use crate::error::EngineError;
use crate::model::{AperiodicJob, PeriodicTask, ServerCfg};

pub mod prelude {
    pub use super::{ParsedInput, parse_file, parse_str};
}

/// Everything recovered from one input file: the periodic task set, the
/// aperiodic job list, and an optional server configuration.
#[derive(Debug, Default)]
pub struct ParsedInput {
    pub tasks: Vec<PeriodicTask>,
    pub aperiodic: Vec<AperiodicJob>,
    pub server_cfg: Option<ServerCfg>,
}

pub fn parse_file(path: &std::path::Path) -> Result<ParsedInput, EngineError> {
    let data = std::fs::read_to_string(path)
        .map_err(|source| EngineError::IoOpenFailed { path: path.display().to_string(), source })?;
    parse_str(&data)
}

pub fn parse_str(data: &str) -> Result<ParsedInput, EngineError> {
    let mut out = ParsedInput::default();

    for (idx, raw_line) in data.lines().enumerate() {
        let line_number = idx + 1;
        let stripped = match raw_line.find('#') {
            Some(pos) => &raw_line[..pos],
            None => raw_line,
        };
        let line = stripped.trim();
        if line.is_empty() {
            continue;
        }

        parse_line(line, line_number, &mut out)
            .map_err(|detail| EngineError::ParseError { line: line_number, text: line.to_owned(), detail })?;
    }

    Ok(out)
}

fn parse_line(line: &str, _line_number: usize, out: &mut ParsedInput) -> Result<(), String> {
    let mut fields = line.split_ascii_whitespace();
    let tag = fields.next().ok_or_else(|| "empty line".to_owned())?.to_ascii_uppercase();
    let nums: Vec<f64> = fields
        .map(|f| f.parse::<f64>().map_err(|err| format!("invalid numeric field '{f}': {err}")))
        .collect::<Result<_, _>>()?;

    match tag.as_str() {
        "P" => parse_periodic(&nums, out),
        "A" => parse_aperiodic(&nums, out),
        "D" => parse_server(&nums, out),
        other => Err(format!("unknown tag '{other}'")),
    }
}

fn round_nonnegative(x: f64) -> Result<u64, String> {
    let rounded = x.round();
    if rounded < 0.0 {
        return Err(format!("value must be non-negative, got {x}"));
    }
    Ok(rounded as u64)
}

/// Like [`round_nonnegative`], but rejects zero too. `exec_time` and
/// `period` are divisors and loop bounds elsewhere in the engine (the
/// release phase computes `(t - arrival) % period`), so zero must never
/// reach a task or job.
fn round_positive(x: f64) -> Result<u64, String> {
    let rounded = x.round();
    if rounded <= 0.0 {
        return Err(format!("value must be positive, got {x}"));
    }
    Ok(rounded as u64)
}

fn parse_periodic(nums: &[f64], out: &mut ParsedInput) -> Result<(), String> {
    let (r, e, p, d) = match nums {
        [r, e, p, d] => (*r, *e, *p, *d),
        [r, e, p] => (*r, *e, *p, *p),
        [e, p] => (0.0, *e, *p, *p),
        _ => return Err("P line must be: 'P r e p d' or 'P r e p' or 'P e p'".to_owned()),
    };

    let task = PeriodicTask {
        name: format!("T{}", out.tasks.len() + 1),
        arrival: round_nonnegative(r)?,
        exec_time: round_positive(e)?,
        period: round_positive(p)?,
        deadline: round_nonnegative(d)?,
    };
    out.tasks.push(task);
    Ok(())
}

fn parse_aperiodic(nums: &[f64], out: &mut ParsedInput) -> Result<(), String> {
    let [r, e] = nums else {
        return Err("A line must be: 'A r e'".to_owned());
    };

    let name = format!("A{}", out.aperiodic.len() + 1);
    out.aperiodic.push(AperiodicJob::new(name, round_nonnegative(*r)?, round_positive(*e)?));
    Ok(())
}

fn parse_server(nums: &[f64], out: &mut ParsedInput) -> Result<(), String> {
    let [q, t, d] = nums else {
        return Err("D line must be: 'D Q T D'".to_owned());
    };

    if out.server_cfg.is_some() {
        return Err("at most one 'D' line is allowed".to_owned());
    }

    out.server_cfg = Some(ServerCfg {
        q: round_nonnegative(*q)?,
        t_period: round_nonnegative(*t)?,
        d: round_nonnegative(*d)?,
    });
    Ok(())
}
