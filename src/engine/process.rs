//! Process-table derivation.
//!
//! Each tick starts from a fresh copy of the benign base table, layers in
//! the synthetic processes of the active attack, and finishes with a stable
//! descending sort by CPU truncated to a fixed cap. With no attack active,
//! synthetic entries are purged outright — remediation is instantaneous,
//! not a decay.

use super::snapshot::{AttackKind, Process, ProcessOrigin, ProcessState};

/// Maximum rows returned to the dashboard.
pub const PROCESS_TABLE_CAP: usize = 8;

/// First pid used for synthetic processes. Purging keys off the origin tag,
/// not this range; the numbering just keeps rendered tables recognizable.
pub const SYNTHETIC_PID_FLOOR: u32 = 5000;

/// The benign long-running services every snapshot starts from.
#[must_use]
pub fn base_table() -> Vec<Process> {
    vec![
        benign(101, "kernel_task", "root", 0.5, ProcessState::Running),
        benign(452, "networkd", "root", 0.2, ProcessState::Sleeping),
        benign(885, "cortex_daemon", "admin", 1.2, ProcessState::Running),
        benign(1102, "docker_engine", "root", 2.5, ProcessState::Running),
    ]
}

fn benign(pid: u32, name: &str, user: &str, cpu: f64, status: ProcessState) -> Process {
    Process {
        pid,
        name: name.to_string(),
        user: user.to_string(),
        cpu,
        status,
        origin: ProcessOrigin::Benign,
    }
}

fn synthetic(pid: u32, name: &str, user: &str, cpu: f64) -> Process {
    debug_assert!(pid >= SYNTHETIC_PID_FLOOR);
    Process {
        pid,
        name: name.to_string(),
        user: user.to_string(),
        cpu,
        status: ProcessState::Running,
        origin: ProcessOrigin::Synthetic,
    }
}

/// Inserts `proc` or replaces an existing row with the same pid.
fn upsert(table: &mut Vec<Process>, proc: Process) {
    match table.iter_mut().find(|p| p.pid == proc.pid) {
        Some(existing) => *existing = proc,
        None => table.push(proc),
    }
}

/// Derives this tick's process table from the base table, the current CPU
/// load, and the active attack.
///
/// Synthetic CPU figures track the load with a fixed per-role offset so the
/// table visually explains where the load is going.
#[must_use]
pub fn derive(base: &[Process], cpu_load: f64, attack: Option<AttackKind>) -> Vec<Process> {
    let mut table: Vec<Process> = base.to_vec();

    match attack {
        Some(AttackKind::Cryptominer) => {
            upsert(
                &mut table,
                synthetic(6666, "xmrig-cuda", "www-data", cpu_load - 5.0),
            );
        }
        Some(AttackKind::Ransomware) => {
            upsert(
                &mut table,
                synthetic(7712, "encrypt_fs.py", "root", cpu_load - 15.0),
            );
            upsert(&mut table, synthetic(7713, "gpg --encrypt", "root", 15.0));
        }
        Some(AttackKind::Ddos) => {
            upsert(
                &mut table,
                synthetic(8899, "syn_flood", "nobody", cpu_load - 2.0),
            );
        }
        None => {
            table.retain(|p| p.origin == ProcessOrigin::Benign);
        }
    }

    // Stable sort: equal-cpu rows keep insertion order.
    table.sort_by(|a, b| b.cpu.partial_cmp(&a.cpu).unwrap_or(std::cmp::Ordering::Equal));
    table.truncate(PROCESS_TABLE_CAP);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(table: &[Process]) -> Vec<&str> {
        table.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn idle_table_is_base_sorted() {
        let table = derive(&base_table(), 5.0, None);
        assert_eq!(table.len(), 4);
        assert_eq!(
            names(&table),
            vec!["docker_engine", "cortex_daemon", "kernel_task", "networkd"]
        );
    }

    #[test]
    fn sorted_descending_by_cpu() {
        let table = derive(&base_table(), 90.0, Some(AttackKind::Cryptominer));
        for pair in table.windows(2) {
            assert!(pair[0].cpu >= pair[1].cpu);
        }
    }

    #[test]
    fn cryptominer_injects_miner() {
        let table = derive(&base_table(), 90.0, Some(AttackKind::Cryptominer));
        let miner = table.iter().find(|p| p.pid == 6666).expect("miner present");
        assert_eq!(miner.name, "xmrig-cuda");
        assert_eq!(miner.origin, ProcessOrigin::Synthetic);
        assert!((miner.cpu - 85.0).abs() < f64::EPSILON);
        // Highest load, so the miner sorts first.
        assert_eq!(table[0].pid, 6666);
    }

    #[test]
    fn ransomware_injects_encryptor_pair() {
        let table = derive(&base_table(), 70.0, Some(AttackKind::Ransomware));
        let encryptor = table.iter().find(|p| p.pid == 7712).expect("encryptor");
        let helper = table.iter().find(|p| p.pid == 7713).expect("gpg helper");
        assert!((encryptor.cpu - 55.0).abs() < f64::EPSILON);
        assert!((helper.cpu - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ddos_injects_flood_generator() {
        let table = derive(&base_table(), 98.0, Some(AttackKind::Ddos));
        let flood = table.iter().find(|p| p.pid == 8899).expect("flood proc");
        assert_eq!(flood.name, "syn_flood");
        assert!((flood.cpu - 96.0).abs() < f64::EPSILON);
    }

    #[test]
    fn upsert_replaces_by_pid_across_ticks() {
        // Simulate two consecutive attack ticks against a table that already
        // carries the synthetic row; the row must be replaced, not duplicated.
        let first = derive(&base_table(), 90.0, Some(AttackKind::Cryptominer));
        let second = derive(&first, 80.0, Some(AttackKind::Cryptominer));
        let miners: Vec<_> = second.iter().filter(|p| p.pid == 6666).collect();
        assert_eq!(miners.len(), 1);
        assert!((miners[0].cpu - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn idle_purges_synthetics() {
        let infected = derive(&base_table(), 70.0, Some(AttackKind::Ransomware));
        assert!(infected.iter().any(|p| p.origin == ProcessOrigin::Synthetic));
        let cleaned = derive(&infected, 5.0, None);
        assert!(cleaned.iter().all(|p| p.origin == ProcessOrigin::Benign));
        assert!(cleaned.iter().all(|p| p.pid < SYNTHETIC_PID_FLOOR));
        assert_eq!(cleaned.len(), 4);
    }

    #[test]
    fn never_exceeds_cap() {
        // Inflate the base table past the cap and check truncation.
        let mut base = base_table();
        for i in 0..10 {
            base.push(Process {
                pid: 2000 + i,
                name: format!("svc_{i}"),
                user: "root".to_string(),
                cpu: 3.0,
                status: ProcessState::Running,
                origin: ProcessOrigin::Benign,
            });
        }
        let table = derive(&base, 90.0, Some(AttackKind::Ddos));
        assert_eq!(table.len(), PROCESS_TABLE_CAP);
    }

    #[test]
    fn base_table_is_never_mutated_by_derive() {
        let base = base_table();
        let _ = derive(&base, 90.0, Some(AttackKind::Cryptominer));
        assert_eq!(base, base_table());
    }
}
