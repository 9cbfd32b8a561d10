//! Recorded-histogram backend
//!
//! Gantree: L5_Backend → RecordedBackend
//!
//! Replays previously captured histograms by program name. Several
//! recordings of the same program are returned in order, one per execution,
//! wrapping around after the last.

use crate::execution::{Backend, ExecutionResult};
use fte_core::{Counts, FteError, FteResult};
use fte_synth::Program;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// On-disk form: program name → recorded histograms
pub type Recordings = HashMap<String, Vec<Counts>>;

/// Replay backend keyed by program name
/// Gantree: RecordedBackend // 기록 재생
#[derive(Debug)]
pub struct RecordedBackend {
    /// Backend name
    name: String,

    /// Recorded histograms
    recordings: Recordings,

    /// Next recording index per program
    cursors: Mutex<HashMap<String, usize>>,
}

/// JSON layout of a recording file
#[derive(Serialize, Deserialize)]
struct RecordingFile {
    backend: String,
    recordings: Recordings,
}

impl RecordedBackend {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create an empty backend
    pub fn new(name: &str) -> Self {
        Self::from_recordings(name, Recordings::new())
    }

    /// Create from existing recordings
    pub fn from_recordings(name: &str, recordings: Recordings) -> Self {
        Self {
            name: name.to_string(),
            recordings,
            cursors: Mutex::new(HashMap::new()),
        }
    }

    /// Add one histogram for a program (builder form)
    pub fn with_histogram(mut self, program: &str, counts: Counts) -> Self {
        self.record(program, counts);
        self
    }

    /// Add one histogram for a program
    pub fn record(&mut self, program: &str, counts: Counts) {
        self.recordings
            .entry(program.to_string())
            .or_default()
            .push(counts);
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Load from JSON text
    pub fn from_json_str(json: &str) -> FteResult<Self> {
        let file: RecordingFile = serde_json::from_str(json)?;
        Ok(Self::from_recordings(&file.backend, file.recordings))
    }

    /// Load from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> FteResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serialize to JSON text
    pub fn to_json(&self) -> FteResult<String> {
        let file = RecordingFile {
            backend: self.name.clone(),
            recordings: self.recordings.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Save to a JSON file
    pub fn save_json(&self, path: impl AsRef<Path>) -> FteResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Number of programs with at least one recording
    pub fn num_programs(&self) -> usize {
        self.recordings.len()
    }

    /// Number of recordings of a program
    pub fn num_recordings(&self, program: &str) -> usize {
        self.recordings.get(program).map_or(0, Vec::len)
    }

    /// Check whether a program has recordings
    pub fn contains(&self, program: &str) -> bool {
        self.num_recordings(program) > 0
    }

    /// Restart every program at its first recording
    pub fn rewind(&self) -> FteResult<()> {
        self.cursors
            .lock()
            .map_err(|e| FteError::BackendError(e.to_string()))?
            .clear();
        Ok(())
    }

    fn next_index(&self, program: &str, available: usize) -> FteResult<usize> {
        let mut cursors = self
            .cursors
            .lock()
            .map_err(|e| FteError::BackendError(e.to_string()))?;
        let cursor = cursors.entry(program.to_string()).or_insert(0);
        let index = *cursor % available;
        *cursor += 1;
        Ok(index)
    }
}

impl Backend for RecordedBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self, program: &Program, shots: u64) -> FteResult<ExecutionResult> {
        self.check_shots(shots)?;

        let recorded = self
            .recordings
            .get(&program.name)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| FteError::ProgramNotFound(program.name.clone()))?;

        let index = self.next_index(&program.name, recorded.len())?;
        let mut result = ExecutionResult::new(recorded[index].clone(), &self.name, &program.name);
        result.metadata.replayed = true;
        result
            .metadata
            .extra
            .insert("recording".to_string(), index.to_string());

        if result.shots != shots {
            debug!(
                "Replayed {} recording {}: {} shots recorded, {} requested",
                program.name, index, result.shots, shots
            );
        }

        Ok(result)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use fte_core::QubitPair;
    use fte_synth::{CircuitSynthesizer, EncodingVersion, LogicalCircuit};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn counts(entries: &[(&str, u64)]) -> Counts {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn x1_programs() -> (Program, Program) {
        let circuit = LogicalCircuit::parse(&["X1"], "|00>", [0.0, 0.0, 1.0, 0.0]).unwrap();
        let program = CircuitSynthesizer::new()
            .synthesize(
                &circuit,
                QubitPair::new(0, 1).unwrap(),
                EncodingVersion::Standard,
                &mut ChaCha8Rng::seed_from_u64(0),
            )
            .unwrap();
        (program.bare, program.encoded)
    }

    #[test]
    fn test_replay_in_order_and_wrap() {
        let (bare, _) = x1_programs();
        let backend = RecordedBackend::new("ibmqx2")
            .with_histogram(&bare.name, counts(&[("00001", 90), ("00000", 10)]))
            .with_histogram(&bare.name, counts(&[("00001", 80), ("00011", 20)]));

        let first = backend.execute(&bare, 100).unwrap();
        let second = backend.execute(&bare, 100).unwrap();
        let third = backend.execute(&bare, 100).unwrap();

        assert_eq!(first.counts["00000"], 10);
        assert_eq!(second.counts["00011"], 20);
        assert_eq!(third.counts, first.counts);
        assert!(first.metadata.replayed);
        assert_eq!(first.metadata.backend, "ibmqx2");
        assert_eq!(second.metadata.extra["recording"], "1");

        backend.rewind().unwrap();
        assert_eq!(backend.execute(&bare, 100).unwrap().counts, first.counts);
    }

    #[test]
    fn test_missing_program() {
        let (bare, encoded) = x1_programs();
        let backend = RecordedBackend::new("rec").with_histogram(&bare.name, counts(&[("00001", 1)]));
        assert_eq!(
            backend.execute(&encoded, 100).unwrap_err(),
            FteError::ProgramNotFound(encoded.name.clone())
        );
        assert!(backend.contains(&bare.name));
        assert!(!backend.contains(&encoded.name));
    }

    #[test]
    fn test_shots_validation() {
        let (bare, _) = x1_programs();
        let backend = RecordedBackend::new("rec").with_histogram(&bare.name, counts(&[("00001", 1)]));
        assert!(matches!(
            backend.execute(&bare, 0),
            Err(FteError::InvalidShots(0, _))
        ));
        assert!(backend.execute(&bare, backend.max_shots() + 1).is_err());
    }

    #[test]
    fn test_batch() {
        let (bare, encoded) = x1_programs();
        let backend = RecordedBackend::new("rec")
            .with_histogram(&bare.name, counts(&[("00001", 8192)]))
            .with_histogram(&encoded.name, counts(&[("10010", 8000), ("00000", 192)]));

        let results = backend.execute_batch(&[&bare, &encoded], 8192).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].metadata.program, encoded.name);
        assert_eq!(results[1].shots, 8192);
    }

    #[test]
    fn test_json_roundtrip() {
        let backend = RecordedBackend::new("ibmqx2")
            .with_histogram("bX1|00>[0,1]", counts(&[("00001", 5)]))
            .with_histogram("bX1|00>[0,1]", counts(&[("00000", 5)]));

        let json = backend.to_json().unwrap();
        let loaded = RecordedBackend::from_json_str(&json).unwrap();
        assert_eq!(loaded.name(), "ibmqx2");
        assert_eq!(loaded.num_programs(), 1);
        assert_eq!(loaded.num_recordings("bX1|00>[0,1]"), 2);
        assert!(RecordedBackend::from_json_str("{").is_err());
    }
}
