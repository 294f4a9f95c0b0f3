use crate::error::{FarmWeatherError, Result};
use crate::ussd::request::INPUT_SEPARATOR;
use crate::ussd::{UssdRequest, UssdService};
use dialoguer::Input;

/// Plays the carrier gateway's part: remembers every reply and sends the
/// whole history with each callback.
pub struct GatewaySimulator {
    session_id: String,
    phone_number: String,
    service_code: String,
    history: Vec<String>,
}

impl GatewaySimulator {
    pub fn new(
        session_id: impl Into<String>,
        phone_number: impl Into<String>,
        service_code: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            phone_number: phone_number.into(),
            service_code: service_code.into(),
            history: Vec::new(),
        }
    }

    /// The opening callback when the user dials the service code
    pub fn dial(&self) -> UssdRequest {
        self.request()
    }

    pub fn reply(&mut self, input: &str) -> UssdRequest {
        self.history.push(input.trim().to_string());
        self.request()
    }

    fn request(&self) -> UssdRequest {
        let separator = INPUT_SEPARATOR.to_string();
        UssdRequest::new(
            self.session_id.as_str(),
            self.phone_number.as_str(),
            self.history.join(&separator),
        )
        .with_service_code(self.service_code.as_str())
    }
}

/// Drive one session on the terminal until the service answers END
pub async fn run(service: &UssdService, mut simulator: GatewaySimulator) -> Result<()> {
    println!("Dialing {} as {}", simulator.service_code, simulator.phone_number);
    println!();

    let mut request = simulator.dial();
    loop {
        let response = service.handle(&request).await;
        println!("{}", response);
        println!();

        if response.is_end() {
            break;
        }

        let input: String = Input::new()
            .with_prompt("Reply")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| FarmWeatherError::InvalidData(format!("Input error: {}", e)))?;

        request = simulator.reply(&input);
    }

    Ok(())
}
