//! argring - Encode/Decode Latency Benchmark
//!
//! Usage:
//!   cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --iterations <N>   Jumlah record per benchmark (default: 1000000)
//!   --capacity <N>     Kapasitas cyclic buffer dalam bytes (default: 1048576)
//!   --storage <path>   Jalankan juga benchmark di atas MmapStorage
//!   --verbose          Aktifkan debug logging

use std::process::ExitCode;
use std::time::Instant;

use argring::core::{ByteBuffer, CyclicBuffer, MmapStorage, Reserve, StorageError};
use argring::protocol::{FormatDescriptor, Serdes, Visitor};
use argring::record::RecordLog;

/// Benchmark configuration
struct BenchConfig {
    iterations: usize,
    capacity: usize,
    storage_path: Option<String>,
    verbose: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: 1_000_000,
            capacity: 1024 * 1024,
            storage_path: None,
            verbose: false,
        }
    }
}

/// Visitor yang hanya mengakumulasi nilai, supaya decode tidak di-optimize out
#[derive(Default)]
struct Checksum {
    acc: f64,
    calls: u64,
}

impl Visitor for Checksum {
    fn visit_i32(&mut self, value: i32) {
        self.acc += value as f64;
        self.calls += 1;
    }

    fn visit_i64(&mut self, value: i64) {
        self.acc += value as f64;
        self.calls += 1;
    }

    fn visit_u32(&mut self, value: u32) {
        self.acc += value as f64;
        self.calls += 1;
    }

    fn visit_u64(&mut self, value: u64) {
        self.acc += value as f64;
        self.calls += 1;
    }

    fn visit_f32(&mut self, value: f32) {
        self.acc += value as f64;
        self.calls += 1;
    }

    fn visit_f64(&mut self, value: f64) {
        self.acc += value;
        self.calls += 1;
    }

    fn visit_bool(&mut self, value: bool) {
        self.acc += value as u8 as f64;
        self.calls += 1;
    }
}

type BenchArgs = (u64, i32, f64, bool);

fn benchmark_serdes<B: ByteBuffer + Reserve>(label: &str, buffer: &mut B, iterations: usize) {
    println!("📊 Serdes Benchmark ({})", label);
    println!("-----------------------------------------");

    let format = Serdes::<BenchArgs>::instance();

    // Warm up
    for i in 0..1000u64 {
        let args: BenchArgs = (i, -(i as i32), i as f64 * 0.5, i % 2 == 0);
        if let Some(range) = buffer.reserve(Serdes::required_size(&args)) {
            Serdes::encode(buffer, range, args);
        }
    }

    // Benchmark encode
    let mut last = None;
    let start = Instant::now();
    for i in 0..iterations as u64 {
        let args: BenchArgs = (i, -(i as i32), i as f64 * 0.5, i % 2 == 0);
        if let Some(range) = buffer.reserve(Serdes::required_size(&args)) {
            Serdes::encode(buffer, range, args);
            last = Some(range);
        }
    }
    let encode_duration = start.elapsed();

    // Benchmark decode: argumen terakhir, walk penuh
    let mut checksum = Checksum::default();
    let start = Instant::now();
    if let Some(range) = last {
        for _ in 0..iterations {
            format.decode_at(&*buffer, buffer.validate(range), 3, &mut checksum);
        }
    }
    let decode_duration = start.elapsed();

    let encode_ns = encode_duration.as_nanos() as f64 / iterations as f64;
    let decode_ns = decode_duration.as_nanos() as f64 / iterations as f64;

    println!("  Record size: {} bytes", format.encoded_size());
    println!("  Operations: {}", iterations);
    println!(
        "  Encode latency: {:.2} ns/op ({:.3} μs/op)",
        encode_ns,
        encode_ns / 1000.0
    );
    println!(
        "  Decode latency: {:.2} ns/op ({:.3} μs/op)",
        decode_ns,
        decode_ns / 1000.0
    );
    println!(
        "  Encode throughput: {:.2} M records/sec",
        iterations as f64 / encode_duration.as_secs_f64() / 1_000_000.0
    );
    println!(
        "  Visitor calls: {} (checksum {:.1})\n",
        checksum.calls, checksum.acc
    );
}

fn benchmark_record_log(config: &BenchConfig) -> Result<(), StorageError> {
    println!("📊 Record Log Benchmark (record + pop + decode)");
    println!("-----------------------------------------------");

    let mut log: RecordLog<CyclicBuffer, 4096> = RecordLog::new(CyclicBuffer::new(config.capacity)?);
    let mut checksum = Checksum::default();

    let start = Instant::now();
    for i in 0..config.iterations as u64 {
        log.record((i, i as f32));
        if let Some(view) = log.next() {
            for index in 0..view.argument_count() {
                view.arg(index, &mut checksum);
            }
        }
    }
    let duration = start.elapsed();

    let per_record_ns = duration.as_nanos() as f64 / config.iterations as f64;
    println!(
        "  Round-trip latency: {:.2} ns/record ({:.3} μs/record)",
        per_record_ns,
        per_record_ns / 1000.0
    );
    println!("  Dropped: {}", log.dropped());
    println!(
        "  Visitor calls: {} (checksum {:.1})\n",
        checksum.calls, checksum.acc
    );

    Ok(())
}

fn parse_args() -> BenchConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = BenchConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--iterations" | "-n" => {
                if i + 1 < args.len() {
                    config.iterations = args[i + 1].parse().unwrap_or(1_000_000);
                    i += 1;
                }
            }
            "--capacity" | "-c" => {
                if i + 1 < args.len() {
                    config.capacity = args[i + 1].parse().unwrap_or(1024 * 1024);
                    i += 1;
                }
            }
            "--storage" | "-s" => {
                if i + 1 < args.len() {
                    config.storage_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--verbose" | "-v" => {
                config.verbose = true;
            }
            "--help" | "-h" => {
                println!("argring benchmark");
                println!();
                println!("Options:");
                println!("  -n, --iterations <N>   Records per benchmark (default: 1000000)");
                println!("  -c, --capacity <N>     Buffer capacity in bytes, power of 2");
                println!("  -s, --storage <path>   Also benchmark mmap-backed storage");
                println!("  -v, --verbose          Enable debug logging");
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn run(config: BenchConfig) -> Result<(), StorageError> {
    let mut buffer = CyclicBuffer::new(config.capacity)?;
    benchmark_serdes("CyclicBuffer", &mut buffer, config.iterations);

    if let Some(path) = &config.storage_path {
        let mut storage = MmapStorage::open(path, config.capacity)?;
        benchmark_serdes("MmapStorage", &mut storage, config.iterations);
        storage.flush()?;
    }

    benchmark_record_log(&config)
}

fn main() -> ExitCode {
    let config = parse_args();

    let level = if config.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    println!("🚀 argring - Encode/Decode Benchmark");
    println!("====================================\n");

    match run(config) {
        Ok(()) => {
            println!("✅ All benchmarks complete!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Benchmark error: {}", e);
            ExitCode::FAILURE
        }
    }
}
