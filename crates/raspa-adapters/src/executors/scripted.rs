//! Executor de test: devuelve resultados predefinidos en orden y guarda cada
//! `IterationInput` recibido.
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use raspa_core::hashing::hash_str;
use raspa_core::{CalculationExecutor, CalculationOutputs, ExecutorFault, IterationInput, ResultFolder};
use uuid::Uuid;

use crate::AdapterError;

#[derive(Debug, Clone)]
pub enum ScriptedOutcome {
    /// El job termina y recupera esta carpeta.
    Retrieved(ResultFolder),
    /// Outputs completos (p. ej. sin `retrieved`).
    Outputs(CalculationOutputs),
    /// El job falla con este mensaje.
    Fault(String),
}

#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    outcomes: Mutex<VecDeque<ScriptedOutcome>>,
    submitted: Mutex<Vec<IterationInput>>,
    delay: Option<Duration>,
}

impl ScriptedExecutor {
    pub fn new(outcomes: Vec<ScriptedOutcome>) -> Self {
        Self { outcomes: Mutex::new(outcomes.into()),
               submitted: Mutex::new(Vec::new()),
               delay: None }
    }

    /// Un job por carpeta, en orden.
    pub fn with_folders(folders: Vec<ResultFolder>) -> Self {
        Self::new(folders.into_iter().map(ScriptedOutcome::Retrieved).collect())
    }

    /// Simula la duración de cada job.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Carpeta ficticia con hash derivado del nombre.
    pub fn folder(name: &str) -> ResultFolder {
        ResultFolder::new(format!("/scripted/{name}"), vec![format!("Output/{name}.data")], hash_str(name))
    }

    pub fn submitted(&self) -> Vec<IterationInput> {
        self.submitted.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn remaining(&self) -> usize {
        self.outcomes.lock().map(|o| o.len()).unwrap_or(0)
    }
}

#[async_trait]
impl CalculationExecutor for ScriptedExecutor {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn submit(&self, input: &IterationInput) -> Result<CalculationOutputs, ExecutorFault> {
        if let Ok(mut submitted) = self.submitted.lock() {
            submitted.push(input.clone());
        }
        let next = self.outcomes.lock().ok().and_then(|mut o| o.pop_front());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match next {
            Some(ScriptedOutcome::Retrieved(folder)) => Ok(CalculationOutputs::retrieved(Uuid::new_v4(), folder)),
            Some(ScriptedOutcome::Outputs(outputs)) => Ok(outputs),
            Some(ScriptedOutcome::Fault(msg)) => Err(Box::new(AdapterError::Scripted(msg))),
            None => Err(Box::new(AdapterError::ScriptExhausted { iteration: input.iteration })),
        }
    }
}
