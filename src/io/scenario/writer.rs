use crate::io::{ScenarioConfig, error::Error, util};
use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

const SUBSTEPS: i32 = 10;
/// Cooling delays shorter than this (seconds) get a single substep.
const SHORT_DELAY: f64 = 1000.0;
const FLAGS_PER_LINE: usize = 8;

/// Checks that `config` describes a scenario the solver accepts.
pub fn validate(config: &ScenarioConfig) -> Result<(), Error> {
    if !config.irradiation.is_finite() || config.irradiation <= 0.0 {
        return Err(Error::validation(format!(
            "irradiation time must be a positive number of seconds, got {}",
            config.irradiation
        )));
    }
    if config.cooling_times.is_empty() {
        return Err(Error::validation("at least one cooling time is required"));
    }
    if let Some(t) = config.cooling_times.iter().find(|t| !t.is_finite()) {
        return Err(Error::validation(format!("cooling time {t} is not finite")));
    }
    if config.outputs.len() != config.cooling_times.len() + 1 {
        return Err(Error::validation(format!(
            "{} output flags given for {} cooling times; expected one per cooling time plus one for the irradiation",
            config.outputs.len(),
            config.cooling_times.len()
        )));
    }
    if let Some(flag) = config.outputs.iter().find(|&&f| f > 1) {
        return Err(Error::validation(format!(
            "output flag {flag} is neither 0 nor 1"
        )));
    }
    if config.outputs[0] != 0 {
        return Err(Error::validation(
            "the output flag of the irradiation step must be 0",
        ));
    }
    Ok(())
}

/// Renders the scenario text. `with_feeds` sets the external-feed switch of
/// the irradiation block.
pub fn render(config: &ScenarioConfig, with_feeds: bool) -> Result<String, Error> {
    validate(config)?;

    let mut out = String::new();
    let isfed = u8::from(with_feeds);

    out.push_str("< Blocks #7 & #8 irradiation set 0\n");
    let _ = writeln!(out, "10  10  1  10  1  {isfed}  0  0");
    let irradiation: Vec<String> = (0..SUBSTEPS)
        .map(|i| util::sci(config.irradiation * 2f64.powi(i + 1 - SUBSTEPS), 3))
        .collect();
    out.push_str(&irradiation.join(", "));

    let last = config.cooling_times.len() - 1;
    let mut previous_steps = SUBSTEPS;
    let mut previous_time = 0.0;
    for (i, &time) in config.cooling_times.iter().enumerate() {
        let isend = u8::from(i != last);
        let _ = write!(out, "\n< Blocks #7 & #8 post-irradiation set {}\n", i + 1);
        if time < SHORT_DELAY {
            let _ = writeln!(out, "0  1  {isend}  {previous_steps}  1  0  0  0");
            out.push_str(&util::sci_upper(time, 3));
            previous_steps = 1;
        } else {
            let _ = writeln!(out, "0  {SUBSTEPS}  {isend}  {previous_steps}  1  0  0  0");
            let steps: Vec<String> = (0..SUBSTEPS)
                .map(|k| {
                    let t = (time - previous_time) * 2f64.powi(k) / 2f64.powi(SUBSTEPS - 1)
                        + previous_time;
                    util::sci(t, 3)
                })
                .collect();
            out.push_str(&steps.join(", "));
            previous_steps = SUBSTEPS;
        }
        previous_time = time;
    }

    let sets = config.cooling_times.len() + 1;
    let [tol_abs, tol_rel] = config.tolerances;
    out.push_str("\n< Block #9 Card #1\n");
    let _ = writeln!(
        out,
        "{} {}",
        util::sci_upper(tol_abs, 1),
        util::sci_upper(tol_rel, 1)
    );
    out.push_str("< Block #10 Card #1\n0 0 0 \n");
    // IWP IMTX IWDR  IDOSE IPHCUT IDHEAT  IOFFSD ICEDE INEMISS IDAMAGE
    out.push_str("< Block #11 card #1\n1 0 1  1 1 0  0 0 0 0 \n");
    out.push_str("< Block #11 card #2\n0 0 1 0 \n");
    // NOPUL NTSEQ NOTTS NVFL
    let _ = writeln!(out, "< Block #11 card #6\n0 0 {sets} 1 ");
    out.push_str("< Block #11 card #7\n");
    out.push_str(&vec!["1"; sets].join(" "));
    out.push_str("\n< Block #12 card #1\n0\n");
    out.push_str("< Block #13 card #1\n0 1\n");
    out.push_str("< Block #13 card #3\n");
    let flags: Vec<String> = config.outputs.iter().map(u8::to_string).collect();
    out.push_str(&util::chunked(&flags, FLAGS_PER_LINE, " "));
    out.push('\n');

    Ok(out)
}

pub fn write<W: Write>(mut writer: W, config: &ScenarioConfig, with_feeds: bool) -> Result<(), Error> {
    let text = render(config, with_feeds)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

/// Writes the scenario to `path`. Nothing is created when validation fails.
pub fn write_to_path(
    path: impl AsRef<Path>,
    config: &ScenarioConfig,
    with_feeds: bool,
) -> Result<String, Error> {
    let text = render(config, with_feeds)?;
    std::fs::write(path, &text)?;
    Ok(text)
}
