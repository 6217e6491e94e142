//! Property-based tests for transcript invariants
//!
//! Whatever mix of follow-ups and upstream failures a conversation sees:
//! - The system turn is first and unchanged
//! - Roles alternate user/assistant after it
//! - The transcript only ever grows by appending
//! - A user turn goes unanswered only if it is the last turn and the
//!   conversation is disconnected

use super::{Conversation, FollowUp, SYSTEM_PREAMBLE};
use crate::llm::testing::MockLlmService;
use crate::llm::{LlmError, LlmService, Role, Turn};
use proptest::prelude::*;
use std::sync::Arc;

fn arb_follow_up() -> impl Strategy<Value = FollowUp> {
    prop::sample::select(vec![
        FollowUp::Elaborate,
        FollowUp::ExplainSimpler,
        FollowUp::Challenge,
        FollowUp::InverseForm,
    ])
}

/// A follow-up paired with whether the upstream answers it
fn arb_steps() -> impl Strategy<Value = Vec<(FollowUp, bool)>> {
    prop::collection::vec((arb_follow_up(), prop::bool::weighted(0.8)), 0..12)
}

fn check_shape(transcript: &[Turn], connected: bool) -> Result<(), TestCaseError> {
    prop_assert!(!transcript.is_empty());
    prop_assert_eq!(&transcript[0], &Turn::system(SYSTEM_PREAMBLE));

    for (i, turn) in transcript.iter().enumerate().skip(1) {
        let expected = if i % 2 == 1 { Role::User } else { Role::Assistant };
        prop_assert_eq!(turn.role, expected, "turn {} out of order", i);
    }

    let dangling = transcript.last().map(|t| t.role) == Some(Role::User);
    if dangling {
        prop_assert!(!connected, "unanswered user turn on a connected conversation");
    }
    Ok(())
}

fn run<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(fut)
}

proptest! {
    #[test]
    fn transcript_alternates_and_only_grows(
        topic in "[a-z ]{1,20}",
        causes_ok in prop::bool::weighted(0.8),
        steps in arb_steps(),
    ) {
        let llm = Arc::new(MockLlmService::new("mock"));
        if causes_ok {
            llm.queue_text("opening answer");
        } else {
            llm.queue_error(LlmError::network("down"));
        }
        for (i, (_, ok)) in steps.iter().enumerate() {
            if *ok {
                llm.queue_text(format!("answer {i}"));
            } else {
                llm.queue_error(LlmError::server_error("boom"));
            }
        }
        let service: Arc<dyn LlmService> = llm.clone();
        let mut conv = Conversation::new(topic.clone(), Some(service));

        run(async {
            let answer = conv.request_causes().await;
            prop_assert_eq!(answer.is_some(), causes_ok);
            prop_assert_eq!(conv.transcript().len(), if causes_ok { 3 } else { 2 });
            check_shape(conv.transcript(), conv.is_connected())?;

            for (kind, _) in &steps {
                let before = conv.transcript().to_vec();
                let was_connected = conv.is_connected();

                let result = conv.follow_up(*kind).await;

                let after = conv.transcript();
                prop_assert_eq!(&after[..before.len()], before.as_slice());
                let grew_by = match (was_connected, result.is_ok()) {
                    (false, _) => 0,
                    (true, true) => 2,
                    (true, false) => 1,
                };
                prop_assert_eq!(after.len(), before.len() + grew_by);
                if was_connected {
                    prop_assert_eq!(&after[before.len()].content, &kind.prompt(&topic));
                }
                check_shape(after, conv.is_connected())?;
            }
            Ok::<(), TestCaseError>(())
        })?;

        // Every request the upstream saw started with the system turn
        for request in llm.recorded_requests() {
            prop_assert_eq!(request.messages[0].role, Role::System);
        }
    }
}
