//! Process table queries shared by the shell, terminal and desktop probes

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

fn process_table() -> System {
    let mut sys = System::new();
    sys.refresh_processes_specifics(ProcessesToUpdate::All, true, ProcessRefreshKind::nothing());
    sys
}

/// Pid of the process that launched kernelview
pub fn parent_pid() -> Option<u32> {
    #[cfg(unix)]
    {
        Some(std::os::unix::process::parent_id())
    }

    #[cfg(not(unix))]
    {
        let current = sysinfo::get_current_pid().ok()?;
        let sys = process_table();
        sys.process(current)
            .and_then(|process| process.parent())
            .map(|pid| pid.as_u32())
    }
}

/// Executable name of the parent process, e.g. `bash` or `WindowsTerminal.exe`
pub fn parent_process_name() -> Option<String> {
    let parent = parent_pid()?;
    let mut sys = System::new();
    let pid = Pid::from_u32(parent);
    sys.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        true,
        ProcessRefreshKind::nothing(),
    );
    sys.process(pid)
        .map(|process| process.name().to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
}

/// Names of every running process
pub fn running_process_names() -> Vec<String> {
    process_table()
        .processes()
        .values()
        .map(|process| process.name().to_string_lossy().into_owned())
        .collect()
}
