// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Outcome tallies for attack simulation.

use contact_gateway::SubmissionResult;
use std::collections::HashMap;

/// Outcome class of one simulated submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Accepted,
    RateLimited,
    ValidationFailed,
    Malformed,
    NotifyFailed,
}

impl From<&SubmissionResult> for Outcome {
    fn from(result: &SubmissionResult) -> Self {
        match result {
            SubmissionResult::Accepted { .. } => Outcome::Accepted,
            SubmissionResult::RateLimited { .. } => Outcome::RateLimited,
            SubmissionResult::ValidationFailed { .. } => Outcome::ValidationFailed,
            SubmissionResult::MalformedInput => Outcome::Malformed,
            SubmissionResult::NotifyFailed => Outcome::NotifyFailed,
        }
    }
}

/// Collects outcomes during attack simulation.
#[derive(Debug, Default)]
pub struct AttackMetrics {
    /// Count of submissions by outcome
    outcomes: HashMap<Outcome, usize>,
    /// Accepted submissions by client
    accepted_per_ip: HashMap<String, usize>,
    /// Count of submissions by client
    requests_per_ip: HashMap<String, usize>,
    /// Submissions that reached the notifier
    delivered: usize,
}

impl AttackMetrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submission outcome.
    pub fn record(&mut self, result: &SubmissionResult, ip: &str) {
        let outcome = Outcome::from(result);
        *self.outcomes.entry(outcome).or_insert(0) += 1;
        *self.requests_per_ip.entry(ip.to_string()).or_insert(0) += 1;
        if outcome == Outcome::Accepted {
            *self.accepted_per_ip.entry(ip.to_string()).or_insert(0) += 1;
        }
    }

    /// Record how many messages the notifier saw in total.
    pub fn set_delivered(&mut self, delivered: usize) {
        self.delivered = delivered;
    }

    /// Get total submission count.
    pub fn total_requests(&self) -> usize {
        self.outcomes.values().sum()
    }

    /// Get count for a specific outcome.
    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Largest number of accepted submissions any one client achieved.
    pub fn max_accepted_per_ip(&self) -> usize {
        self.accepted_per_ip.values().copied().max().unwrap_or(0)
    }

    /// Get number of unique clients.
    pub fn unique_ips(&self) -> usize {
        self.requests_per_ip.len()
    }

    /// Get block rate (ratio of non-accepted to total).
    pub fn block_rate(&self) -> f64 {
        let total = self.total_requests();
        if total == 0 {
            return 0.0;
        }
        (total - self.count(Outcome::Accepted)) as f64 / total as f64
    }

    /// Generate a summary report.
    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            total_requests: self.total_requests(),
            accepted: self.count(Outcome::Accepted),
            delivered: self.delivered,
            rate_limited: self.count(Outcome::RateLimited),
            validation_failed: self.count(Outcome::ValidationFailed),
            malformed: self.count(Outcome::Malformed),
            notify_failed: self.count(Outcome::NotifyFailed),
            block_rate: self.block_rate(),
            unique_ips: self.unique_ips(),
            max_accepted_per_ip: self.max_accepted_per_ip(),
        }
    }
}

/// Summary report of attack metrics.
#[derive(Debug, Clone)]
pub struct MetricsReport {
    pub total_requests: usize,
    pub accepted: usize,
    pub delivered: usize,
    pub rate_limited: usize,
    pub validation_failed: usize,
    pub malformed: usize,
    pub notify_failed: usize,
    pub block_rate: f64,
    pub unique_ips: usize,
    pub max_accepted_per_ip: usize,
}

impl std::fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Attack Metrics Report ===")?;
        writeln!(f, "Total Requests:    {}", self.total_requests)?;
        writeln!(f)?;
        writeln!(f, "--- Outcomes ---")?;
        writeln!(f, "Accepted:          {}", self.accepted)?;
        writeln!(f, "Delivered:         {}", self.delivered)?;
        writeln!(f, "Rate Limited:      {}", self.rate_limited)?;
        writeln!(f, "Validation Failed: {}", self.validation_failed)?;
        writeln!(f, "Malformed:         {}", self.malformed)?;
        writeln!(f, "Notify Failed:     {}", self.notify_failed)?;
        writeln!(f, "Block Rate:        {:.1}%", self.block_rate * 100.0)?;
        writeln!(f)?;
        writeln!(f, "--- Distribution ---")?;
        writeln!(f, "Unique IPs:        {}", self.unique_ips)?;
        writeln!(f, "Max Accepted/IP:   {}", self.max_accepted_per_ip)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collection() {
        let mut metrics = AttackMetrics::new();
        metrics.record(&SubmissionResult::MalformedInput, "10.0.0.1");
        metrics.record(&SubmissionResult::NotifyFailed, "10.0.0.2");
        metrics.record(&SubmissionResult::MalformedInput, "10.0.0.1");

        assert_eq!(metrics.total_requests(), 3);
        assert_eq!(metrics.count(Outcome::Malformed), 2);
        assert_eq!(metrics.unique_ips(), 2);
        assert_eq!(metrics.max_accepted_per_ip(), 0);
        assert!((metrics.block_rate() - 1.0).abs() < f64::EPSILON);
    }
}
