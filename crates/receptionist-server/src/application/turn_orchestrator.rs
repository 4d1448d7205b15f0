//! Turn Orchestrator
//!
//! One call per webhook event. Nothing is kept between turns: events of
//! the same call are tied together only through `call_sid` in the call
//! log.
//!
//! ```text
//! AwaitingFirstTurn --answer_call--> AwaitingSpeech
//! AwaitingSpeech --speech turn--> ProcessingTurn
//! ProcessingTurn --shouldContinue--> AwaitingSpeech
//! ProcessingTurn --otherwise/fault--> Terminated
//! ```

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use receptionist::{
    CallRecord, ConversationState, DomainError, Gather, NewCallRecord, NotificationPayload,
    VoiceResponse,
};

use super::{
    CallLogService, DispatchReport, NotificationService, ReplyGenerator, TranscriptClassifier,
};
use crate::config::Persona;

/// Path the telephony layer posts gathered speech to
pub const SPEECH_CALLBACK_PATH: &str = "/api/twilio/process-speech";

const NO_INPUT_LINE: &str = "I did not receive any input. Goodbye.";
const CLOSING_LINE: &str = "Thank you for reaching out. Have a peaceful day ahead.";
const CALL_APOLOGY: &str = "Sorry, there was an error. Please try again later.";
const TURN_APOLOGY: &str =
    "Sorry, there was an error processing your request. Please try again later.";

/// Initial incoming-call event
#[derive(Debug, Clone)]
pub struct IncomingCall {
    pub caller_number: String,
    pub call_sid: String,
}

/// Speech-turn event
#[derive(Debug, Clone)]
pub struct SpeechTurn {
    pub transcript: Option<String>,
    pub caller_number: String,
    pub call_sid: String,
}

/// Everything a speech turn produced
#[derive(Debug)]
pub struct TurnOutcome {
    pub response: VoiceResponse,
    /// Record appended for this turn, if the write succeeded
    pub record: Option<CallRecord>,
    /// Detached fan-out, present only for important calls
    pub notification: Option<JoinHandle<DispatchReport>>,
}

impl TurnOutcome {
    fn failed() -> Self {
        Self {
            response: TurnOrchestrator::turn_failure_response(),
            record: None,
            notification: None,
        }
    }
}

pub struct TurnOrchestrator {
    classifier: TranscriptClassifier,
    reply_generator: ReplyGenerator,
    call_logs: Arc<CallLogService>,
    notifications: Arc<NotificationService>,
    persona: Persona,
    /// Language-model time allowed for one speech turn
    turn_budget: Duration,
}

impl TurnOrchestrator {
    pub fn new(
        classifier: TranscriptClassifier,
        reply_generator: ReplyGenerator,
        call_logs: Arc<CallLogService>,
        notifications: Arc<NotificationService>,
        persona: Persona,
        turn_budget: Duration,
    ) -> Self {
        Self {
            classifier,
            reply_generator,
            call_logs,
            notifications,
            persona,
            turn_budget,
        }
    }

    /// Greet the caller and start gathering speech
    pub fn answer_call(&self, call: &IncomingCall) -> VoiceResponse {
        tracing::info!(
            call_sid = %call.call_sid,
            from = %call.caller_number,
            "📞 Incoming call"
        );

        let greeting = format!(
            "Assalamualaikum, this is {}, {}'s virtual assistant. How may I help you today?",
            self.persona.assistant_name, self.persona.owner_name
        );

        let response = self
            .speak(VoiceResponse::new(), greeting)
            .gather(self.speech_gather())
            .say(NO_INPUT_LINE)
            .hangup();

        tracing::debug!(
            call_sid = %call.call_sid,
            from = %ConversationState::AwaitingFirstTurn,
            to = %response.next_state(),
            "Turn rendered"
        );
        response
    }

    /// Classify, persist, alert and answer one speech turn.
    ///
    /// Never fails: any fault renders the apology program. Classification
    /// and reply generation share one deadline, so the reply gets only the
    /// time classification left over.
    pub async fn handle_speech_turn(&self, turn: SpeechTurn) -> TurnOutcome {
        match self.try_speech_turn(&turn).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(call_sid = %turn.call_sid, error = %e, "Speech turn failed");
                TurnOutcome::failed()
            }
        }
    }

    async fn try_speech_turn(&self, turn: &SpeechTurn) -> Result<TurnOutcome, DomainError> {
        let transcript = turn
            .transcript
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DomainError::Validation("Missing speech transcript".into()))?;

        tracing::info!(
            call_sid = %turn.call_sid,
            from = %turn.caller_number,
            state = %ConversationState::ProcessingTurn,
            transcript,
            "🗣️  Speech received"
        );

        let deadline = Instant::now() + self.turn_budget;

        let analysis = self
            .classifier
            .classify(transcript, &turn.caller_number, deadline)
            .await;

        let record = self
            .call_logs
            .record(NewCallRecord::from_turn(
                turn.call_sid.as_str(),
                turn.caller_number.as_str(),
                transcript,
                &analysis,
            ))
            .await;

        let notification = analysis.is_important.then(|| {
            self.notifications.dispatch(NotificationPayload::from_analysis(
                &analysis,
                turn.caller_number.as_str(),
            ))
        });

        let reply = self
            .reply_generator
            .generate(transcript, &analysis, deadline)
            .await;

        let response = self.speak(VoiceResponse::new(), reply);
        let response = if analysis.should_continue {
            response.gather(self.speech_gather())
        } else {
            self.speak(response, CLOSING_LINE).hangup()
        };

        let next = response.next_state();
        tracing::debug!(
            call_sid = %turn.call_sid,
            important = analysis.is_important,
            to = %next,
            "Turn rendered"
        );
        if next.is_terminal() {
            tracing::info!(call_sid = %turn.call_sid, "📴 Conversation closed");
        }

        Ok(TurnOutcome {
            response,
            record,
            notification,
        })
    }

    /// Program played when the initial call event cannot be handled
    pub fn call_failure_response() -> VoiceResponse {
        VoiceResponse::new().say(CALL_APOLOGY).hangup()
    }

    /// Program played when a speech turn cannot be handled
    pub fn turn_failure_response() -> VoiceResponse {
        VoiceResponse::new().say(TURN_APOLOGY).hangup()
    }

    fn speak(&self, response: VoiceResponse, text: impl Into<String>) -> VoiceResponse {
        response.say_with_voice(text, &self.persona.voice, &self.persona.language)
    }

    fn speech_gather(&self) -> Gather {
        Gather::speech(SPEECH_CALLBACK_PATH, &self.persona.language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use receptionist::{LlmProvider, NotificationChannel, VoiceInstruction};

    use crate::adapters::InMemoryCallLogRepository;
    use crate::application::testing::{analysis, CountingChannel, StubLlm};

    struct Harness {
        orchestrator: TurnOrchestrator,
        call_logs: Arc<CallLogService>,
        llm: Arc<StubLlm>,
        channel: Arc<CountingChannel>,
    }

    fn harness(llm: StubLlm) -> Harness {
        harness_with(llm, Duration::from_secs(5), Duration::from_secs(12))
    }

    fn harness_with(llm: StubLlm, timeout: Duration, turn_budget: Duration) -> Harness {
        let llm = Arc::new(llm);
        let provider: Arc<dyn LlmProvider> = llm.clone();
        let channel = Arc::new(CountingChannel::working("email"));
        let email: Arc<dyn NotificationChannel> = channel.clone();
        let persona = Persona::default();
        let call_logs = Arc::new(CallLogService::new(Arc::new(
            InMemoryCallLogRepository::new(),
        )));

        let orchestrator = TurnOrchestrator::new(
            TranscriptClassifier::new(Some(provider.clone()), timeout, &persona),
            ReplyGenerator::new(Some(provider), timeout, &persona),
            call_logs.clone(),
            Arc::new(NotificationService::new(vec![email])),
            persona,
            turn_budget,
        );

        Harness {
            orchestrator,
            call_logs,
            llm,
            channel,
        }
    }

    fn turn(transcript: Option<&str>) -> SpeechTurn {
        SpeechTurn {
            transcript: transcript.map(str::to_string),
            caller_number: "+15551234567".to_string(),
            call_sid: "CA123".to_string(),
        }
    }

    #[test]
    fn test_answer_call_greets_then_gathers() {
        let h = harness(StubLlm::failing());
        let response = h.orchestrator.answer_call(&IncomingCall {
            caller_number: "+15551234567".to_string(),
            call_sid: "CA123".to_string(),
        });

        let instructions = response.instructions();
        assert_eq!(
            instructions[0],
            VoiceInstruction::Say {
                text: "Assalamualaikum, this is Iqra, Syed Eman Ali Shah's virtual assistant. \
                       How may I help you today?"
                    .to_string(),
                voice: Some("Polly.Joanna".to_string()),
                language: Some("en-US".to_string()),
            }
        );
        match &instructions[1] {
            VoiceInstruction::Gather(gather) => {
                assert_eq!(gather.action, SPEECH_CALLBACK_PATH);
                assert_eq!(gather.timeout_secs, 5);
            }
            other => panic!("expected gather, got {other:?}"),
        }
        assert!(response.ends_with_hangup());
        assert_eq!(response.next_state(), ConversationState::AwaitingSpeech);
        assert_eq!(h.llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_important_turn_records_notifies_and_continues() {
        let h = harness(StubLlm::answering(&analysis(true, true), "I'll let him know."));

        let outcome = h
            .orchestrator
            .handle_speech_turn(turn(Some("This is urgent, please call me back")))
            .await;

        let report = outcome.notification.expect("fan-out launched").await.unwrap();
        assert_eq!(report.sent, 1);
        assert_eq!(h.channel.sends(), 1);

        let record = outcome.record.expect("record saved");
        assert!(record.is_important);
        assert_eq!(record.duration, 0);
        assert_eq!(record.caller, "Sara");

        let snapshot = h.call_logs.dashboard(50).await;
        assert_eq!(snapshot.logs.len(), 1);

        assert!(matches!(
            outcome.response.last(),
            Some(VoiceInstruction::Gather(_))
        ));
        assert_eq!(outcome.response.next_state(), ConversationState::AwaitingSpeech);
    }

    #[tokio::test]
    async fn test_finished_turn_closes_and_hangs_up() {
        let h = harness(StubLlm::answering(&analysis(false, false), "Goodbye!"));

        let outcome = h.orchestrator.handle_speech_turn(turn(Some("wrong number"))).await;

        assert!(outcome.notification.is_none());
        assert_eq!(h.channel.sends(), 0);

        let instructions = outcome.response.instructions();
        assert_eq!(instructions.len(), 3);
        assert!(matches!(
            &instructions[1],
            VoiceInstruction::Say { text, .. } if text == CLOSING_LINE
        ));
        assert!(outcome.response.ends_with_hangup());
        assert!(!instructions
            .iter()
            .any(|i| matches!(i, VoiceInstruction::Gather(_))));
        assert_eq!(outcome.response.next_state(), ConversationState::Terminated);
    }

    #[tokio::test]
    async fn test_provider_outage_still_answers() {
        let h = harness(StubLlm::failing());

        let outcome = h.orchestrator.handle_speech_turn(turn(Some("hello?"))).await;

        let record = outcome.record.expect("record saved");
        assert_eq!(record.topic, "Unable to analyze");
        assert!(outcome.notification.is_none());
        assert!(matches!(
            &outcome.response.instructions()[0],
            VoiceInstruction::Say { text, .. } if text == "Thank you for calling. Have a wonderful day!"
        ));
        assert!(outcome.response.ends_with_hangup());
    }

    #[tokio::test]
    async fn test_blank_transcript_renders_apology() {
        let h = harness(StubLlm::answering(&analysis(true, true), "ok"));

        for transcript in [None, Some("   ")] {
            let outcome = h.orchestrator.handle_speech_turn(turn(transcript)).await;

            assert_eq!(outcome.response, TurnOrchestrator::turn_failure_response());
            assert!(outcome.record.is_none());
            assert!(outcome.notification.is_none());
        }

        assert_eq!(h.llm.calls(), 0);
        assert!(h.call_logs.dashboard(50).await.logs.is_empty());
    }

    #[tokio::test]
    async fn test_slow_provider_shares_one_turn_deadline() {
        let h = harness_with(
            StubLlm::answering(&analysis(true, true), "ok").with_delay(Duration::from_secs(5)),
            Duration::from_millis(300),
            Duration::from_millis(400),
        );
        let started = Instant::now();

        let outcome = h.orchestrator.handle_speech_turn(turn(Some("hello?"))).await;

        // two sequential 300ms timeouts would take 600ms
        assert!(started.elapsed() < Duration::from_millis(550));
        assert_eq!(h.llm.calls(), 2);
        assert_eq!(outcome.record.expect("record saved").topic, "Unable to analyze");
        assert!(matches!(
            &outcome.response.instructions()[0],
            VoiceInstruction::Say { text, .. } if text == "Thank you for calling. Have a wonderful day!"
        ));
        assert!(outcome.response.ends_with_hangup());
    }
}
