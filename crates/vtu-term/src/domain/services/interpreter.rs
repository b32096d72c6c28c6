#[cfg(test)]
#[path = "interpreter_test.rs"]
mod tests;

use vtu_core::catalog;
use vtu_core::{
    AirtimeRequest, ChangePasswordRequest, DataPlan, DataPurchaseRequest, ElectricityRequest,
    MeterType, Session, UpdateAccountRequest,
};

use crate::domain::models::{ApiCall, ApiOutcome, Command, Stage, TranscriptLine};

const MASKED_INPUT: &str = "> ********";
const ABORT_KEYWORDS: [&str; 2] = ["ABORT", "CANCEL"];

pub fn help_text() -> String {
    let text = r#"
VTU_OS CORE CMDS:
  HELP      - DISPLAY SYS_CMDS
  CLEAR     - FLUSH BUFFER
  LOGIN     - AUTHENTICATE_USER
  SIGNUP    - INITIALIZE_NEW_ID
  LOGOUT    - TERMINATE_SESSION
  BALANCE   - QUERY_CREDITS
  PROFILE   - DUMP_IDENT_RECORD
  HISTORY   - READ_ACTIVITY_LOG
  DATA      - INJECT_DATA_PACKETS
  AIRTIME   - ALLOCATE_VOICE
  ELECT     - GRID_POWER_MOD
  UPDATE    - EDIT_IDENT_RECORD
  PASSWD    - ROTATE_ACCESS_KEY
  EXIT      - KILL_PROCESS
"#;

    return text.trim().to_string();
}

/// Everything one interpreter step asks the application layer to do:
/// transcript lines to append, at most one backend call to issue, and the
/// transcript-clear / process-exit signals.
#[derive(Debug, Default)]
pub struct StepOutput {
    pub lines: Vec<TranscriptLine>,
    pub call: Option<ApiCall>,
    pub clear_transcript: bool,
    pub exit: bool,
}

/// The scripted command interpreter.
///
/// Consumes one submitted line at a time, walks the per-flow collection
/// stages, and emits at most one [`ApiCall`] per completed flow. Backend
/// responses come back through [`Interpreter::handle_outcome`], which always
/// returns the stage to idle for flow-terminal calls.
#[derive(Debug, Default)]
pub struct Interpreter {
    stage: Stage,
}

impl Interpreter {
    pub fn new() -> Interpreter {
        return Interpreter { stage: Stage::Idle };
    }

    pub fn stage(&self) -> &Stage {
        return &self.stage;
    }

    /// Lines shown when a terminal session opens.
    pub fn banner() -> Vec<TranscriptLine> {
        return vec![
            TranscriptLine::output("VTU_CONNECT KERNEL v1.0.4-STABLE"),
            TranscriptLine::output("ESTABLISHING SECURE ENCLAVE..."),
            TranscriptLine::success("SYSTEM_ACCESS: GRANTED"),
            TranscriptLine::warning("TYPE 'HELP' FOR AVAILABLE COMMANDS"),
        ];
    }

    pub fn handle_line(&mut self, raw: &str, session: &Session) -> StepOutput {
        let raw = raw.trim();
        let mut out = StepOutput::default();
        if raw.is_empty() {
            return out;
        }

        if self.stage.is_secret_entry() {
            out.lines.push(TranscriptLine::input(MASKED_INPUT));
        } else {
            out.lines.push(TranscriptLine::input(&format!("> {raw}")));
        }

        let token = raw.to_uppercase();
        if ABORT_KEYWORDS.contains(&token.as_str()) {
            self.reset(&mut out);
            return out;
        }

        match std::mem::take(&mut self.stage) {
            Stage::Idle => self.handle_command(&token, session, &mut out),

            Stage::LoginEmail => {
                self.stage = Stage::LoginPassword {
                    email: raw.to_string(),
                };
                out.lines.push(TranscriptLine::warning("ENTER ACCESS_KEY:"));
            }
            Stage::LoginPassword { email } => {
                out.lines.push(TranscriptLine::output("AUTHENTICATING..."));
                out.call = Some(ApiCall::Login {
                    email: email.clone(),
                    password: raw.to_string(),
                });
                self.stage = Stage::LoginPassword { email };
            }

            Stage::SignupUsername => {
                self.stage = Stage::SignupEmail {
                    username: raw.to_string(),
                };
                out.lines
                    .push(TranscriptLine::warning("ENTER IDENT_USER_EMAIL:"));
            }
            Stage::SignupEmail { username } => {
                self.stage = Stage::SignupPassword {
                    username,
                    email: raw.to_string(),
                };
                out.lines
                    .push(TranscriptLine::warning("ENTER NEW_ACCESS_KEY:"));
            }
            Stage::SignupPassword { username, email } => {
                out.lines.push(TranscriptLine::output("REGISTERING_ID..."));
                out.call = Some(ApiCall::Signup {
                    username: username.clone(),
                    email: email.clone(),
                    password: raw.to_string(),
                });
                self.stage = Stage::SignupPassword { username, email };
            }

            Stage::DataNetwork => match catalog::find_carrier(raw) {
                Some(carrier) => {
                    out.lines.push(TranscriptLine::output(&format!(
                        "SCANNING_PACKETS_FOR_{}...",
                        carrier.name
                    )));
                    out.call = Some(ApiCall::FetchPlans);
                    self.stage = Stage::DataPlansLoading { carrier: *carrier };
                }
                None => {
                    out.lines.push(TranscriptLine::error(
                        "INVALID_CARRIER_NODE. SELECT FROM LIST:",
                    ));
                    self.stage = Stage::DataNetwork;
                }
            },
            Stage::DataPlansLoading { carrier } => {
                // Scan still in flight; input stays locked upstream.
                self.stage = Stage::DataPlansLoading { carrier };
            }
            Stage::DataPlanChoice { carrier, plans } => {
                let choice = raw
                    .parse::<usize>()
                    .ok()
                    .filter(|index| (1..=plans.len()).contains(index));
                match choice {
                    Some(index) => {
                        let plan = plans[index - 1].clone();
                        self.stage = Stage::DataNumber { carrier, plan };
                        out.lines.push(TranscriptLine::warning(
                            "ENTER DESTINATION_PROTOCOL_HUB (PH_NUM):",
                        ));
                    }
                    None => {
                        out.lines.push(TranscriptLine::error(
                            "INVALID_PACKET_INDEX. SELECT FROM LIST:",
                        ));
                        self.stage = Stage::DataPlanChoice { carrier, plans };
                    }
                }
            }
            Stage::DataNumber { carrier, plan } => {
                out.lines
                    .push(TranscriptLine::output("INITIATING_INJECTION..."));
                out.call = Some(ApiCall::BuyData(DataPurchaseRequest {
                    network_id: carrier.id.to_string(),
                    mobile_number: raw.to_string(),
                    plan_id: plan.id.clone(),
                    ported_number: false,
                }));
                self.stage = Stage::DataNumber { carrier, plan };
            }

            Stage::AirtimeNetwork => match catalog::find_carrier(raw) {
                Some(carrier) => {
                    self.stage = Stage::AirtimeAmount { carrier: *carrier };
                    out.lines
                        .push(TranscriptLine::warning("ENTER CREDIT_AMOUNT_(NGN):"));
                }
                None => {
                    out.lines.push(TranscriptLine::error(
                        "INVALID_CARRIER_NODE. SELECT FROM LIST:",
                    ));
                    self.stage = Stage::AirtimeNetwork;
                }
            },
            Stage::AirtimeAmount { carrier } => match parse_amount(raw) {
                Some(amount) => {
                    self.stage = Stage::AirtimeNumber { carrier, amount };
                    out.lines.push(TranscriptLine::warning(
                        "ENTER DESTINATION_PROTOCOL_HUB (PH_NUM):",
                    ));
                }
                None => {
                    out.lines.push(TranscriptLine::error(
                        "INVALID_AMOUNT. ENTER POSITIVE_INTEGER_(NGN):",
                    ));
                    self.stage = Stage::AirtimeAmount { carrier };
                }
            },
            Stage::AirtimeNumber { carrier, amount } => {
                out.lines
                    .push(TranscriptLine::output("ALLOCATING_CIRCUIT..."));
                out.call = Some(ApiCall::BuyAirtime(AirtimeRequest {
                    network_id: carrier.name.to_string(),
                    phone: raw.to_string(),
                    amount,
                }));
                self.stage = Stage::AirtimeNumber { carrier, amount };
            }

            Stage::ElectricityProvider => match catalog::find_disco(raw) {
                Some(disco) => {
                    self.stage = Stage::ElectricityMeterType { disco: *disco };
                    out.lines
                        .push(TranscriptLine::warning("SELECT METER_PROTOCOL:"));
                    out.lines.push(TranscriptLine::output("  1 - PREPAID"));
                    out.lines.push(TranscriptLine::output("  2 - POSTPAID"));
                }
                None => {
                    out.lines.push(TranscriptLine::error(
                        "INVALID_PROVIDER_HUB. SELECT FROM LIST:",
                    ));
                    self.stage = Stage::ElectricityProvider;
                }
            },
            Stage::ElectricityMeterType { disco } => {
                let meter_type = match token.as_str() {
                    "1" => Some(MeterType::Prepaid),
                    "2" => Some(MeterType::Postpaid),
                    _ => None,
                };
                match meter_type {
                    Some(meter_type) => {
                        self.stage = Stage::ElectricityMeterNumber { disco, meter_type };
                        out.lines
                            .push(TranscriptLine::warning("ENTER METER_IDENTITY_NODE:"));
                    }
                    None => {
                        out.lines.push(TranscriptLine::error(
                            "INVALID_PROTOCOL. SELECT 1 (PREPAID) OR 2 (POSTPAID):",
                        ));
                        self.stage = Stage::ElectricityMeterType { disco };
                    }
                }
            }
            Stage::ElectricityMeterNumber { disco, meter_type } => {
                self.stage = Stage::ElectricityAmount {
                    disco,
                    meter_type,
                    meter_number: raw.to_string(),
                };
                out.lines
                    .push(TranscriptLine::warning("ENTER ENERGY_CREDIT_UNITS (NGN):"));
            }
            Stage::ElectricityAmount {
                disco,
                meter_type,
                meter_number,
            } => match parse_amount(raw) {
                Some(amount) => {
                    self.stage = Stage::ElectricityNumber {
                        disco,
                        meter_type,
                        meter_number,
                        amount,
                    };
                    out.lines.push(TranscriptLine::warning(
                        "ENTER ALERT_RECIPIENT_HUB (PH_NUM):",
                    ));
                }
                None => {
                    out.lines.push(TranscriptLine::error(
                        "INVALID_AMOUNT. ENTER POSITIVE_INTEGER_(NGN):",
                    ));
                    self.stage = Stage::ElectricityAmount {
                        disco,
                        meter_type,
                        meter_number,
                    };
                }
            },
            Stage::ElectricityNumber {
                disco,
                meter_type,
                meter_number,
                amount,
            } => {
                out.lines
                    .push(TranscriptLine::output("INJECTING_POWER_UNITS..."));
                out.call = Some(ApiCall::BuyElectricity(ElectricityRequest {
                    disco_name: disco.name.to_string(),
                    amount,
                    meter_number: meter_number.clone(),
                    meter_type,
                    mobile_number: raw.to_string(),
                }));
                self.stage = Stage::ElectricityNumber {
                    disco,
                    meter_type,
                    meter_number,
                    amount,
                };
            }

            Stage::UpdateUsername => {
                self.stage = Stage::UpdateEmail {
                    username: raw.to_string(),
                };
                out.lines
                    .push(TranscriptLine::warning("ENTER NEW IDENT_USER_EMAIL:"));
            }
            Stage::UpdateEmail { username } => {
                out.lines
                    .push(TranscriptLine::output("SYNCING_IDENT_RECORD..."));
                out.call = Some(ApiCall::UpdateAccount(UpdateAccountRequest {
                    username: username.clone(),
                    email: raw.to_string(),
                }));
                self.stage = Stage::UpdateEmail { username };
            }

            Stage::PasswordCurrent => {
                self.stage = Stage::PasswordNew {
                    current: raw.to_string(),
                };
                out.lines
                    .push(TranscriptLine::warning("ENTER NEW_ACCESS_KEY:"));
            }
            Stage::PasswordNew { current } => {
                out.lines
                    .push(TranscriptLine::output("ROTATING_ACCESS_KEY..."));
                out.call = Some(ApiCall::ChangePassword(ChangePasswordRequest {
                    old_password: current.clone(),
                    new_password: raw.to_string(),
                }));
                self.stage = Stage::PasswordNew { current };
            }
        }

        return out;
    }

    pub fn handle_outcome(&mut self, outcome: ApiOutcome, session: &mut Session) -> StepOutput {
        let mut out = StepOutput::default();

        match outcome {
            ApiOutcome::Login(Ok(auth)) => {
                session.set_user(auth.user);
                out.lines
                    .push(TranscriptLine::success("ACCESS_GRANTED. WELCOME_USER."));
                self.reset(&mut out);
            }
            ApiOutcome::Login(Err(err)) => {
                out.lines
                    .push(TranscriptLine::error(&format!("AUTH_FAILED: {err}")));
                self.reset(&mut out);
            }

            ApiOutcome::Signup(Ok(())) => {
                out.lines.push(TranscriptLine::success(
                    "ID_CREATED_SUCCESSFULLY. RUN 'LOGIN' TO START.",
                ));
                self.reset(&mut out);
            }
            ApiOutcome::Signup(Err(err)) => {
                out.lines
                    .push(TranscriptLine::error(&format!("REG_FAILED: {err}")));
                self.reset(&mut out);
            }

            ApiOutcome::Logout => {
                session.clear();
                out.lines.push(TranscriptLine::success(
                    "SESSION_TERMINATED. ACCESS_TOKEN_PURGED.",
                ));
            }

            ApiOutcome::Balance(Ok(user)) => {
                out.lines
                    .push(TranscriptLine::output(&format!("AUTH_USER: {}", user.username)));
                out.lines.push(TranscriptLine::success(&format!(
                    "CURRENT_BALANCE: ₦{}",
                    user.wallet_balance
                )));
                session.set_user(user);
            }
            ApiOutcome::Balance(Err(err)) => {
                out.lines
                    .push(TranscriptLine::error(&format!("SYNC_ERROR: {err}")));
            }

            ApiOutcome::Profile(Ok(user)) => {
                out.lines.push(TranscriptLine::output("IDENT_RECORD:"));
                out.lines
                    .push(TranscriptLine::output(&format!("  USER_ID:  {}", user.id)));
                out.lines.push(TranscriptLine::output(&format!(
                    "  USERNAME: {}",
                    user.username
                )));
                out.lines
                    .push(TranscriptLine::output(&format!("  EMAIL:    {}", user.email)));
                out.lines.push(TranscriptLine::success(&format!(
                    "  BALANCE:  ₦{}",
                    user.wallet_balance
                )));
                session.set_user(user);
            }
            ApiOutcome::Profile(Err(err)) => {
                out.lines
                    .push(TranscriptLine::error(&format!("RECORD_FETCH_FAILED: {err}")));
            }

            ApiOutcome::History(Ok(transactions)) => {
                if transactions.is_empty() {
                    out.lines.push(TranscriptLine::warning("NO_ACTIVITY_RECORDED."));
                } else {
                    out.lines.push(TranscriptLine::output(&format!(
                        "SYSTEM_ACTIVITY_LOG ({} ENTRIES):",
                        transactions.len()
                    )));
                    for transaction in &transactions {
                        out.lines.push(TranscriptLine::output(&format!(
                            "  {} | {} | {} | ₦{} | {}",
                            transaction.created_at.format("%Y-%m-%d %H:%M"),
                            transaction.reference,
                            transaction.kind.to_uppercase(),
                            transaction.amount,
                            transaction.status.as_str()
                        )));
                    }
                }
            }
            ApiOutcome::History(Err(err)) => {
                out.lines.push(TranscriptLine::error(&format!(
                    "LOG_RETRIEVAL_FAILED: {err}"
                )));
            }

            ApiOutcome::Plans(result) => {
                self.handle_plans(result, &mut out);
            }

            ApiOutcome::BuyData(Ok(())) => {
                out.lines.push(TranscriptLine::success(
                    "INJECTION_SUCCESSFUL. DATA_PACKET_DELIVERED.",
                ));
                self.reset(&mut out);
            }
            ApiOutcome::BuyData(Err(err)) => {
                out.lines
                    .push(TranscriptLine::error(&format!("INJECTION_FAILED: {err}")));
                self.reset(&mut out);
            }

            ApiOutcome::BuyAirtime(Ok(())) => {
                out.lines.push(TranscriptLine::success(
                    "ALLOCATION_SUCCESSFUL. VOICE_LINK_ACTIVE.",
                ));
                self.reset(&mut out);
            }
            ApiOutcome::BuyAirtime(Err(err)) => {
                out.lines
                    .push(TranscriptLine::error(&format!("ALLOCATION_FAILED: {err}")));
                self.reset(&mut out);
            }

            ApiOutcome::BuyElectricity(Ok(())) => {
                out.lines.push(TranscriptLine::success(
                    "POWER_INJECTION_SUCCESSFUL. GRID_STABLE.",
                ));
                self.reset(&mut out);
            }
            ApiOutcome::BuyElectricity(Err(err)) => {
                out.lines
                    .push(TranscriptLine::error(&format!("GRID_REJECTED: {err}")));
                self.reset(&mut out);
            }

            ApiOutcome::UpdateAccount(Ok(user)) => {
                session.set_user(user);
                out.lines
                    .push(TranscriptLine::success("IDENT_RECORD_UPDATED."));
                self.reset(&mut out);
            }
            ApiOutcome::UpdateAccount(Err(err)) => {
                out.lines
                    .push(TranscriptLine::error(&format!("UPDATE_FAILED: {err}")));
                self.reset(&mut out);
            }

            ApiOutcome::ChangePassword(Ok(())) => {
                out.lines.push(TranscriptLine::success("ACCESS_KEY_ROTATED."));
                self.reset(&mut out);
            }
            ApiOutcome::ChangePassword(Err(err)) => {
                out.lines
                    .push(TranscriptLine::error(&format!("ROTATION_FAILED: {err}")));
                self.reset(&mut out);
            }
        }

        return out;
    }

    fn handle_command(&mut self, token: &str, session: &Session, out: &mut StepOutput) {
        let command = match Command::parse(token) {
            Some(command) => command,
            None => {
                out.lines.push(TranscriptLine::error(&format!(
                    "ERR: CMD_NOT_RECOGNIZED: {token}"
                )));
                out.lines.push(TranscriptLine::output("TYPE 'HELP' FOR MANUAL"));
                return;
            }
        };

        if command.requires_session() && !session.is_authenticated() {
            out.lines.push(TranscriptLine::error(
                "ERR: UNAUTHORIZED. RUN 'LOGIN' FIRST.",
            ));
            return;
        }

        match command {
            Command::Help => {
                for line in help_text().split('\n') {
                    out.lines.push(TranscriptLine::output(line));
                }
            }
            Command::Clear => {
                out.clear_transcript = true;
            }
            Command::Exit => {
                out.exit = true;
            }
            Command::Login => {
                self.stage = Stage::LoginEmail;
                out.lines
                    .push(TranscriptLine::warning("INITIALIZING AUTH_SEQUENCE..."));
                out.lines
                    .push(TranscriptLine::warning("ENTER IDENT_USER_EMAIL:"));
            }
            Command::Signup => {
                self.stage = Stage::SignupUsername;
                out.lines
                    .push(TranscriptLine::warning("INITIALIZING REG_SEQUENCE..."));
                out.lines
                    .push(TranscriptLine::warning("ENTER IDENT_SYS_USERNAME:"));
            }
            Command::Logout => {
                out.lines
                    .push(TranscriptLine::output("TERMINATING_SESSION..."));
                out.call = Some(ApiCall::Logout);
            }
            Command::Balance => {
                out.lines
                    .push(TranscriptLine::output("QUERYING_WALLET_RESOURCES..."));
                out.call = Some(ApiCall::FetchBalance);
            }
            Command::Profile => {
                out.lines
                    .push(TranscriptLine::output("FETCHING_IDENT_RECORD..."));
                out.call = Some(ApiCall::FetchProfile);
            }
            Command::History => {
                out.lines
                    .push(TranscriptLine::output("RETRIEVING_SYSTEM_ACTIVITY..."));
                out.call = Some(ApiCall::FetchHistory);
            }
            Command::Data => {
                self.stage = Stage::DataNetwork;
                out.lines.push(TranscriptLine::warning("SELECT CARRIER_NODE:"));
                list_carriers(out);
            }
            Command::Airtime => {
                self.stage = Stage::AirtimeNetwork;
                out.lines.push(TranscriptLine::warning("SELECT CARRIER_NODE:"));
                list_carriers(out);
            }
            Command::Electricity => {
                self.stage = Stage::ElectricityProvider;
                out.lines
                    .push(TranscriptLine::warning("SELECT ENERGY_PROVIDER:"));
                list_discos(out);
            }
            Command::Update => {
                self.stage = Stage::UpdateUsername;
                out.lines
                    .push(TranscriptLine::warning("ENTER NEW IDENT_SYS_USERNAME:"));
            }
            Command::Password => {
                self.stage = Stage::PasswordCurrent;
                out.lines
                    .push(TranscriptLine::warning("ENTER CURRENT ACCESS_KEY:"));
            }
        }
    }

    fn handle_plans(&mut self, result: Result<Vec<DataPlan>, vtu_core::VtuError>, out: &mut StepOutput) {
        let carrier = match std::mem::take(&mut self.stage) {
            Stage::DataPlansLoading { carrier } => carrier,
            // Response without a scan in flight; nothing owns it.
            other => {
                self.stage = other;
                return;
            }
        };

        match result {
            Ok(plans) => {
                let plans: Vec<DataPlan> = plans
                    .into_iter()
                    .filter(|plan| plan.network.eq_ignore_ascii_case(carrier.name))
                    .collect();
                if plans.is_empty() {
                    out.lines.push(TranscriptLine::error(
                        "NO_PACKETS_AVAILABLE_FOR_THIS_NODE.",
                    ));
                    self.reset(out);
                    return;
                }
                out.lines.push(TranscriptLine::warning("SELECT DATA_PACKET_"));
                for (index, plan) in plans.iter().enumerate() {
                    out.lines.push(TranscriptLine::output(&format!(
                        "  {} - {} [₦{}] ({})",
                        index + 1,
                        plan.size,
                        plan.amount,
                        plan.duration
                    )));
                }
                self.stage = Stage::DataPlanChoice { carrier, plans };
            }
            Err(err) => {
                out.lines
                    .push(TranscriptLine::error(&format!("SCAN_ERROR: {err}")));
                self.reset(out);
            }
        }
    }

    fn reset(&mut self, out: &mut StepOutput) {
        self.stage = Stage::Idle;
        out.lines
            .push(TranscriptLine::output("RETURNING_TO_IDLE_STATE..."));
    }
}

fn parse_amount(raw: &str) -> Option<u64> {
    return raw.trim().parse::<u64>().ok().filter(|amount| *amount > 0);
}

fn list_carriers(out: &mut StepOutput) {
    for carrier in catalog::CARRIERS {
        out.lines.push(TranscriptLine::output(&format!(
            "  {} - {}",
            carrier.id, carrier.name
        )));
    }
}

fn list_discos(out: &mut StepOutput) {
    for disco in catalog::DISCOS {
        out.lines.push(TranscriptLine::output(&format!(
            "  {} - {}",
            disco.id, disco.name
        )));
    }
}
