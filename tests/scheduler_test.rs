/*!
 * Scheduler Tests
 * End-to-end log sequences and ordering under each scheduling policy
 */

use pretty_assertions::assert_eq;
use sched_sim::process::Resource;
use sched_sim::{
    CostModel, MemorySink, Pcb, ProcessState, SchedulerConfig, SchedulingPolicy, Simulation,
    SimulationReport, TimeQuantum,
};

fn run(
    policy: SchedulingPolicy,
    quantum: Option<u64>,
    costs: CostModel,
    workload: Vec<Pcb>,
) -> (SimulationReport, MemorySink) {
    let sink = MemorySink::new();
    let quantum = quantum.map(|q| TimeQuantum::new(q).unwrap());
    let report = Simulation::builder()
        .with_config(SchedulerConfig::new(policy, quantum, costs).unwrap())
        .with_workload(workload)
        .with_sink(sink.clone())
        .build()
        .unwrap()
        .run()
        .unwrap();
    (report, sink)
}

fn position(messages: &[String], needle: &str) -> usize {
    messages
        .iter()
        .position(|m| m == needle)
        .unwrap_or_else(|| panic!("missing log line: {needle}"))
}

#[test]
fn test_round_robin_single_process_scenario() {
    let (report, sink) = run(
        SchedulingPolicy::RoundRobin,
        Some(2),
        CostModel::uniform(1.0),
        vec![Pcb::builder(1).compute(5).build()],
    );

    assert_eq!(
        sink.lines(),
        vec![
            "0.000000 - Simulator program starting",
            "0.000000 - OS: preparing all processes",
            "0.000000 - OS: selecting next process",
            "0.000000 - OS: starting process 1",
            "0.000000 - Process 1: start processing action",
            "0.002000 - Process 1: block processing action",
            "0.002000 - OS: selecting next process",
            "0.002000 - Process 1: start processing action",
            "0.004000 - Process 1: block processing action",
            "0.004000 - OS: selecting next process",
            "0.004000 - Process 1: start processing action",
            "0.005000 - Process 1: end processing action",
            "0.005000 - OS: removing process 1",
            "0.005000 - Simulator program ending",
        ]
    );

    let summary = report.process(1).unwrap();
    assert_eq!(summary.state, ProcessState::Exit);
    assert_eq!(summary.grants, 3);
    assert_eq!(summary.preemptions, 2);
    assert_eq!(report.stats.quantum_grants, 3);
}

#[test]
fn test_fifo_two_process_scenario() {
    let (report, sink) = run(
        SchedulingPolicy::Fifo,
        None,
        CostModel::uniform(1.0),
        vec![
            Pcb::builder(1).compute(1).build(),
            Pcb::builder(2).compute(1).build(),
        ],
    );

    let messages = sink.messages();
    assert!(position(&messages, "OS: removing process 1") < position(&messages, "OS: starting process 2"));
    assert_eq!(
        messages,
        vec![
            "Simulator program starting",
            "OS: preparing all processes",
            "OS: selecting next process",
            "OS: starting process 1",
            "Process 1: start processing action",
            "Process 1: end processing action",
            "OS: removing process 1",
            "OS: selecting next process",
            "OS: starting process 2",
            "Process 2: start processing action",
            "Process 2: end processing action",
            "OS: removing process 2",
            "Simulator program ending",
        ]
    );
    assert!(report.all_exited());
}

#[test]
fn test_sjf_starts_in_estimate_order() {
    let costs = CostModel::from_costs([
        (Resource::Run, 10.0),
        (Resource::Monitor, 20.0),
        (Resource::HardDrive, 15.0),
        (Resource::Printer, 25.0),
        (Resource::Keyboard, 50.0),
    ])
    .unwrap();
    let workload = vec![
        // 6 * 10 = 60
        Pcb::builder(1).compute(6).build(),
        // 1 * 50 = 50
        Pcb::builder(2).input(Resource::Keyboard, 1).build(),
        // 2 * 15 + 1 * 10 = 40
        Pcb::builder(3).input(Resource::HardDrive, 2).compute(1).build(),
        // 2 * 20 = 40, ties with pid 3
        Pcb::builder(4).output(Resource::Monitor, 2).build(),
    ];
    let (_report, sink) = run(SchedulingPolicy::Sjf, None, costs, workload);

    let starts: Vec<String> = sink
        .messages()
        .into_iter()
        .filter(|m| m.starts_with("OS: starting process"))
        .collect();
    assert_eq!(
        starts,
        vec![
            "OS: starting process 3",
            "OS: starting process 4",
            "OS: starting process 2",
            "OS: starting process 1",
        ]
    );
}

#[test]
fn test_srtf_reevaluates_at_each_selection() {
    let workload = vec![
        Pcb::builder(1).compute(4).build(),
        Pcb::builder(2).compute(1).build(),
        Pcb::builder(3).compute(4).build(),
    ];
    let (report, sink) = run(
        SchedulingPolicy::Srtf,
        None,
        CostModel::uniform(1.0),
        workload,
    );

    let messages = sink.messages();
    let p2 = position(&messages, "OS: starting process 2");
    let p1 = position(&messages, "OS: starting process 1");
    let p3 = position(&messages, "OS: starting process 3");
    assert!(p2 < p1 && p1 < p3);
    assert_eq!(report.stats.preemptions, 0);
}

#[test]
fn test_fifo_preemptive_keeps_blocked_process_at_front() {
    let workload = vec![
        Pcb::builder(1).compute(3).build(),
        Pcb::builder(2).compute(1).build(),
    ];
    let (report, sink) = run(
        SchedulingPolicy::FifoPreemptive,
        Some(1),
        CostModel::uniform(1.0),
        workload,
    );

    let messages = sink.messages();
    assert!(position(&messages, "OS: removing process 1") < position(&messages, "OS: starting process 2"));
    assert_eq!(report.process(1).unwrap().grants, 3);
    assert_eq!(report.process(2).unwrap().grants, 1);
}

#[test]
fn test_round_robin_alternates_between_ready_processes() {
    let workload = vec![
        Pcb::builder(1).compute(4).build(),
        Pcb::builder(2).compute(2).output(Resource::Printer, 2).build(),
    ];
    let (report, sink) = run(
        SchedulingPolicy::RoundRobin,
        Some(2),
        CostModel::uniform(1.0),
        workload,
    );

    let owners: Vec<&str> = sink
        .messages()
        .iter()
        .filter_map(|m| m.strip_prefix("Process "))
        .filter(|m| m.contains(": start"))
        .map(|m| if m.starts_with('1') { "1" } else { "2" })
        .collect();
    assert_eq!(owners, vec!["1", "2", "1", "2"]);
    assert_eq!(report.process(1).unwrap().grants, 2);
    assert_eq!(report.process(2).unwrap().grants, 2);
    assert!(report.all_exited());
}

#[test]
fn test_srtf_preemptive_picks_shortest_remaining() {
    let workload = vec![
        Pcb::builder(1).compute(5).build(),
        Pcb::builder(2).compute(3).build(),
    ];
    let (report, sink) = run(
        SchedulingPolicy::SrtfPreemptive,
        Some(2),
        CostModel::uniform(1.0),
        workload,
    );

    let messages = sink.messages();
    assert!(position(&messages, "OS: removing process 2") < position(&messages, "OS: starting process 1"));
    assert_eq!(report.process(1).unwrap().estimated_remaining_cost, 0.0);
    assert_eq!(report.process(2).unwrap().estimated_remaining_cost, 0.0);
}

#[test]
fn test_io_messages_name_the_resource() {
    let workload = vec![Pcb::builder(1)
        .input(Resource::HardDrive, 3)
        .output(Resource::Printer, 1)
        .build()];
    let (_report, sink) = run(
        SchedulingPolicy::RoundRobin,
        Some(2),
        CostModel::uniform(1.0),
        workload,
    );

    let process_lines: Vec<String> = sink
        .messages()
        .into_iter()
        .filter(|m| m.starts_with("Process 1"))
        .collect();
    assert_eq!(
        process_lines,
        vec![
            "Process 1: start hard drive input",
            "Process 1: block hard drive input",
            "Process 1: start hard drive input",
            "Process 1: end hard drive input",
            "Process 1: start printer output",
            "Process 1: end printer output",
        ]
    );
}
