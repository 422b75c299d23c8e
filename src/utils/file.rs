//! File reading utilities

use crate::error::{KernelviewError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Safely read a file to string with error handling
pub fn read_file_safe<P: AsRef<Path>>(path: P) -> Result<String> {
    fs::read_to_string(path).map_err(KernelviewError::from)
}

/// Read first line of a file, trimmed
/// Meant for single-line pseudo files like /proc/uptime
#[cfg(unix)]
pub fn read_first_line<P: AsRef<Path>>(path: P) -> Result<String> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let path_cstr = CString::new(path.as_ref().as_os_str().as_bytes())
        .map_err(|_| KernelviewError::parse("Invalid path"))?;

    // Procfs files are tiny; one read(2) into a stack buffer is enough
    unsafe {
        let fd = libc::open(path_cstr.as_ptr(), libc::O_RDONLY);
        if fd < 0 {
            return Err(KernelviewError::from(std::io::Error::last_os_error()));
        }

        let mut buffer = [0u8; 256];
        let bytes_read = libc::read(fd, buffer.as_mut_ptr() as *mut libc::c_void, buffer.len());
        libc::close(fd);

        if bytes_read < 0 {
            return Err(KernelviewError::from(std::io::Error::last_os_error()));
        }

        if bytes_read == 0 {
            return Ok(String::new());
        }

        let content = std::str::from_utf8(&buffer[..bytes_read as usize])
            .map_err(|_| KernelviewError::parse("Invalid UTF-8"))?;
        Ok(content.lines().next().unwrap_or("").trim().to_string())
    }
}

#[cfg(not(unix))]
pub fn read_first_line<P: AsRef<Path>>(path: P) -> Result<String> {
    let content = read_file_safe(path)?;
    Ok(content.lines().next().unwrap_or("").trim().to_string())
}

/// Check if a file exists safely
pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}

/// Parse `KEY=value` lines (os-release, lsb-release) into a map.
/// Surrounding double quotes are stripped from values.
pub fn parse_key_value(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .filter_map(|line| line.trim().split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().trim_matches('"').to_string()))
        .collect()
}

/// Read and parse a `KEY=value` file
pub fn read_key_value_file<P: AsRef<Path>>(path: P) -> Result<HashMap<String, String>> {
    read_file_safe(path).map(|content| parse_key_value(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn key_value_strips_quotes() {
        let map = parse_key_value(
            "NAME=\"Ubuntu\"\nPRETTY_NAME=\"Ubuntu 22.04.3 LTS\"\n# comment\nID=ubuntu\nEMPTY=\n",
        );
        assert_eq!(map["PRETTY_NAME"], "Ubuntu 22.04.3 LTS");
        assert_eq!(map["ID"], "ubuntu");
        assert_eq!(map["EMPTY"], "");
        assert!(!map.contains_key("# comment"));
    }

    #[test]
    fn first_line_is_trimmed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  12345.67 890.12  ").unwrap();
        writeln!(file, "second").unwrap();
        assert_eq!(read_first_line(file.path()).unwrap(), "12345.67 890.12");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = read_file_safe("/definitely/not/here/kernelview");
        assert!(matches!(result, Err(KernelviewError::Io(_))));
        assert!(!file_exists("/definitely/not/here/kernelview"));
    }
}
