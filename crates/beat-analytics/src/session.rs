//! 화면에 표시 중인 비교 결과 상태.
//!
//! 새 요청은 이전 요청을 암묵적으로 대체합니다. 각 요청에 단조 증가하는
//! [`RequestTicket`]을 붙이고, 가장 최근에 발급된 티켓의 결과만 반영합니다.
//! 실패가 반영되면 이전 결과는 지워지고 에러 메시지 하나만 남습니다.

use std::sync::atomic::{AtomicU64, Ordering};

use beat_core::{CompareError, CompareResult, ComparisonReport};
use beat_data::SeriesFetcher;
use tokio::sync::RwLock;
use tracing::debug;

use crate::comparison::{ComparisonRequest, ComparisonService};

/// 요청 순번.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// 결과 반영 여부.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// 최신 요청의 결과로 상태에 반영됨
    Applied,
    /// 더 새로운 요청이 발급되어 버려짐
    Discarded,
}

/// 현재 표시 상태.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DisplayState {
    /// 아직 아무 결과도 없음
    #[default]
    Idle,
    /// 성공한 비교 결과
    Report(ComparisonReport),
    /// 실패 메시지 (이전 결과는 지워짐)
    Failed(CompareError),
}

#[derive(Debug, Default)]
struct SessionState {
    applied: Option<RequestTicket>,
    display: DisplayState,
}

/// 비교 세션.
#[derive(Debug, Default)]
pub struct ComparisonSession {
    issued: AtomicU64,
    state: RwLock<SessionState>,
}

impl ComparisonSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 새 요청 티켓을 발급합니다. 이전에 발급된 티켓은 모두 낡은 것이 됩니다.
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// 가장 최근에 발급된 티켓인지 확인합니다.
    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// 요청 결과를 반영합니다.
    ///
    /// 티켓이 최신이 아니면 상태를 건드리지 않고 `Discarded`를 반환합니다.
    pub async fn complete(
        &self,
        ticket: RequestTicket,
        result: CompareResult<ComparisonReport>,
    ) -> Completion {
        let mut state = self.state.write().await;

        if !self.is_latest(ticket) || state.applied.is_some_and(|applied| applied > ticket) {
            debug!(ticket = ticket.0, "낡은 결과 폐기");
            return Completion::Discarded;
        }

        state.applied = Some(ticket);
        state.display = match result {
            Ok(report) => DisplayState::Report(report),
            Err(e) => DisplayState::Failed(e),
        };
        Completion::Applied
    }

    /// 티켓 발급, 비교 실행, 결과 반영을 한 번에 수행합니다.
    pub async fn run<F: SeriesFetcher>(
        &self,
        service: &ComparisonService<F>,
        request: &ComparisonRequest,
    ) -> Completion {
        let ticket = self.begin();
        let result = service.compare(request).await;
        self.complete(ticket, result).await
    }

    /// 현재 표시 상태의 복사본.
    pub async fn display(&self) -> DisplayState {
        self.state.read().await.display.clone()
    }

    /// 현재 표시 중인 비교 결과.
    pub async fn current_report(&self) -> Option<ComparisonReport> {
        match &self.state.read().await.display {
            DisplayState::Report(report) => Some(report.clone()),
            _ => None,
        }
    }

    /// 현재 표시 중인 에러.
    pub async fn current_error(&self) -> Option<CompareError> {
        match &self.state.read().await.display {
            DisplayState::Failed(e) => Some(e.clone()),
            _ => None,
        }
    }

    /// 반영되지 않은 최신 요청이 있는지 확인합니다.
    pub async fn is_pending(&self) -> bool {
        let issued = self.issued.load(Ordering::SeqCst);
        self.state
            .read()
            .await
            .applied
            .map_or(issued > 0, |applied| applied.0 < issued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tickets_increase() {
        let session = ComparisonSession::new();
        let first = session.begin();
        let second = session.begin();
        assert!(second > first);
        assert!(!session.is_latest(first));
        assert!(session.is_latest(second));
    }

    #[tokio::test]
    async fn test_stale_failure_is_discarded() {
        let session = ComparisonSession::new();
        let stale = session.begin();
        let latest = session.begin();

        let outcome = session
            .complete(latest, Err(CompareError::invalid("bad symbol")))
            .await;
        assert_eq!(outcome, Completion::Applied);

        let outcome = session
            .complete(stale, Err(CompareError::Timeout { secs: 30 }))
            .await;
        assert_eq!(outcome, Completion::Discarded);
        assert_eq!(
            session.current_error().await,
            Some(CompareError::invalid("bad symbol"))
        );
        assert!(!session.is_pending().await);
    }

    #[tokio::test]
    async fn test_pending_until_applied() {
        let session = ComparisonSession::new();
        assert!(!session.is_pending().await);
        let ticket = session.begin();
        assert!(session.is_pending().await);
        session
            .complete(ticket, Err(CompareError::Timeout { secs: 1 }))
            .await;
        assert!(!session.is_pending().await);
        assert_eq!(
            session.display().await,
            DisplayState::Failed(CompareError::Timeout { secs: 1 })
        );
    }
}
