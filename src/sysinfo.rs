//! Host identification for chart captions, from uname(2), sysconf(3) and /proc/cpuinfo.

use std::fmt;
use std::fs;
use std::io;

/// Shown when the CPU model cannot be determined
pub const UNKNOWN_CPU: &str = "Unknown CPU";

/// Source of the kernel's CPU description
pub trait CpuInfoSource {
    fn read_cpuinfo(&self) -> io::Result<String>;
}

/// Reads /proc/cpuinfo
pub struct ProcCpuInfo;

impl CpuInfoSource for ProcCpuInfo {
    fn read_cpuinfo(&self) -> io::Result<String> {
        fs::read_to_string("/proc/cpuinfo")
    }
}

/// One-line description of the machine that produced the charts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemIdentity {
    pub platform: String,
    pub cpu_model: String,
    pub logical_cores: usize,
}

impl SystemIdentity {
    /// Query the host. Never fails; unknown fields fall back to placeholders.
    pub fn probe(cpuinfo: &dyn CpuInfoSource) -> Self {
        let cpu_model = cpuinfo
            .read_cpuinfo()
            .ok()
            .and_then(|content| parse_model_name(&content))
            .unwrap_or_else(|| UNKNOWN_CPU.to_string());

        Self {
            platform: platform(),
            cpu_model,
            logical_cores: logical_cores(),
        }
    }
}

impl fmt::Display for SystemIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "System: {} | CPU: {} | Cores: {}",
            self.platform, self.cpu_model, self.logical_cores
        )
    }
}

/// First non-empty "model name" value in cpuinfo content
fn parse_model_name(content: &str) -> Option<String> {
    content
        .lines()
        .filter(|line| line.contains("model name"))
        .find_map(|line| {
            let (_, value) = line.split_once(':')?;
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        })
}

/// "<sysname>-<release>-<machine>", or the compile-time OS and arch if uname fails
fn platform() -> String {
    #[cfg(unix)]
    {
        use std::ffi::CStr;
        use std::mem::MaybeUninit;

        let mut uts = MaybeUninit::<libc::utsname>::uninit();
        let result = unsafe { libc::uname(uts.as_mut_ptr()) };

        if result == 0 {
            let uts = unsafe { uts.assume_init() };
            let field = |raw: &[libc::c_char]| {
                unsafe { CStr::from_ptr(raw.as_ptr()) }.to_string_lossy().into_owned()
            };
            return format!(
                "{}-{}-{}",
                field(&uts.sysname[..]),
                field(&uts.release[..]),
                field(&uts.machine[..])
            );
        }
    }

    format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH)
}

fn logical_cores() -> usize {
    #[cfg(unix)]
    {
        let online = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
        if online > 0 {
            return online as usize;
        }
    }

    1
}
