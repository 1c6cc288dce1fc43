use crate::io::{CollapseConfig, GroupStructure, error::Error, util};
use std::io::Write;

const VALUES_PER_LINE: usize = 6;

/// Writes the collapse deck for one cell.
///
/// `flux` is the per-source-particle group flux in tally order (increasing
/// energy); only its first `NGROUP` values are used. Each is multiplied by
/// `source` and the whole set is written in decreasing-energy order.
pub fn write<W: Write>(
    mut writer: W,
    config: &CollapseConfig,
    flux: &[f64],
    source: f64,
) -> Result<(), Error> {
    if let GroupStructure::Custom { bins } = &config.group_structure {
        if !config.confirm_nonstandard {
            return Err(Error::NonStandardGroupStructure);
        }
        if bins.len() < 2 {
            return Err(Error::validation(
                "a custom group structure needs at least two bin boundaries",
            ));
        }
        log::warn!(
            "Writing a non-standard {}-group structure; the solver may not support it",
            bins.len() - 1
        );
    }

    let ngroup = config.group_structure.group_count();
    if flux.len() < ngroup {
        return Err(Error::validation(format!(
            "flux has {} groups, the group structure needs {}",
            flux.len(),
            ngroup
        )));
    }

    let (ilib, iesf) = config.group_structure.selectors();
    writeln!(writer, "{} {}", ilib, iesf)?;
    writeln!(writer, "{}", config.library.header_lines())?;
    writeln!(writer, "0 0 0 0")?;
    writeln!(writer, "-{} 0", ngroup)?;

    if let GroupStructure::Custom { bins } = &config.group_structure {
        let edges: Vec<String> = bins[..bins.len() - 1]
            .iter()
            .rev()
            .map(|&e| util::sci(e, 5))
            .collect();
        writeln!(writer, "{}", util::chunked(&edges, VALUES_PER_LINE, " "))?;
    }

    let levels: Vec<String> = flux[..ngroup]
        .iter()
        .rev()
        .map(|&f| util::sci(f * source, 5))
        .collect();
    writeln!(writer, "{}", util::chunked(&levels, VALUES_PER_LINE, " "))?;

    // IUNC3G, ISTOP
    writeln!(writer, "0")?;
    writeln!(writer, "0")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::DataLibrary;

    fn render(config: &CollapseConfig, flux: &[f64], source: f64) -> Result<String, Error> {
        let mut buf = Vec::new();
        write(&mut buf, config, flux, source)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    fn custom(bins: Vec<f64>, confirm: bool) -> CollapseConfig {
        CollapseConfig {
            library: DataLibrary::Eaf,
            group_structure: GroupStructure::Custom { bins },
            confirm_nonstandard: confirm,
        }
    }

    #[test]
    fn standard_structure_writes_211_reversed_groups() {
        let flux: Vec<f64> = (1..=212).map(f64::from).collect();
        let text = render(&CollapseConfig::default(), &flux, 2.0).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(&lines[..4], &["12 12", "16", "0 0 0 0", "-211 0"]);
        // 211 values at six per line.
        assert_eq!(lines.len(), 4 + 36 + 2);
        assert!(lines[4].starts_with("4.22000e+02 4.20000e+02"));
        assert_eq!(lines[4].split(' ').count(), 6);
        assert_eq!(lines[39], "2.00000e+00");
        assert_eq!(&lines[40..], &["0", "0"]);
        assert!(text.ends_with("\n0\n0\n"));
    }

    #[test]
    fn other_libraries_use_longer_header() {
        let config = CollapseConfig {
            library: DataLibrary::Other,
            ..CollapseConfig::default()
        };
        let text = render(&config, &[1.0; 211], 1.0).unwrap();
        assert_eq!(text.lines().nth(1), Some("32"));
    }

    #[test]
    fn custom_structure_needs_confirmation() {
        let config = custom(vec![1.0, 2.0, 3.0], false);
        assert!(matches!(
            render(&config, &[1.0, 1.0], 1.0),
            Err(Error::NonStandardGroupStructure)
        ));
    }

    #[test]
    fn custom_structure_writes_bins() {
        let config = custom(vec![0.1, 1.0, 10.0], true);
        let text = render(&config, &[3.0, 4.0, 99.0], 10.0).unwrap();
        assert_eq!(
            text,
            "5 5\n16\n0 0 0 0\n-2 0\n1.00000e+00 1.00000e-01\n4.00000e+01 3.00000e+01\n0\n0\n"
        );
    }

    #[test]
    fn short_flux_is_rejected() {
        let config = custom(vec![0.1, 1.0, 10.0], true);
        assert!(matches!(
            render(&config, &[1.0], 1.0),
            Err(Error::Validation(_))
        ));
    }
}
