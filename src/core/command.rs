use crate::{config::AdapterConfig, types::SeparateOptions};
use std::{ffi::OsString, fmt, path::Path, process::Command};

/// A fully resolved invocation of the separation tool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemucsCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl DemucsCommand {
    /// `<python> -m demucs.separate --shifts N --overlap F -n MODEL -d DEVICE INPUT -o OUT`
    pub fn build(
        config: &AdapterConfig,
        opts: &SeparateOptions,
        input: &Path,
        output_dir: &Path,
    ) -> Self {
        let mut args: Vec<OsString> = config.module_args.iter().map(OsString::from).collect();

        let flags: [OsString; 11] = [
            "--shifts".into(),
            opts.shifts.to_string().into(),
            "--overlap".into(),
            format_overlap(opts.overlap).into(),
            "-n".into(),
            opts.model_name.clone().into(),
            "-d".into(),
            config.device.clone().into(),
            input.as_os_str().to_owned(),
            "-o".into(),
            output_dir.as_os_str().to_owned(),
        ];
        args.extend(flags);

        Self {
            program: OsString::from(&config.python),
            args,
        }
    }

    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    /// Value following `flag`, if present.
    pub fn flag_value(&self, flag: &str) -> Option<&OsString> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
    }
}

impl fmt::Display for DemucsCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Shortest round-trip form, keeping `.0` on whole numbers (`1.0`, `0.25`).
pub fn format_overlap(overlap: f64) -> String {
    format!("{overlap:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_keeps_decimal_point() {
        assert_eq!(format_overlap(0.25), "0.25");
        assert_eq!(format_overlap(1.0), "1.0");
        assert_eq!(format_overlap(0.0), "0.0");
        assert_eq!(format_overlap(0.1), "0.1");
    }
}
