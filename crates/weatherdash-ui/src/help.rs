//! Static help text.

use weatherdash_core::API_KEY_ENV;

/// Steps for obtaining and installing a WeatherAPI.com key
pub fn setup_instructions() -> String {
    format!(
        "Weather API Setup\n\
         \n\
         weatherdash uses WeatherAPI.com for live weather data.\n\
         Without a key the dashboard shows placeholder data.\n\
         \n\
         1. Sign up for a free account at https://www.weatherapi.com/signup.aspx\n\
         2. Copy your API key from the account dashboard\n\
         3. Make it available to weatherdash, either:\n\
         \x20    export {API_KEY_ENV}=your_api_key_here\n\
         \x20  or set `api_key` under [weather] in the config file\n\
         4. Restart weatherdash\n"
    )
}

/// Commands understood by the interactive dashboard
pub fn command_help() -> &'static str {
    "Commands:\n\
     \x20 <place> | search <place>   show weather for a location\n\
     \x20 refresh | r                fetch the latest data now\n\
     \x20 hourly | details           switch the lower panel\n\
     \x20 help                       show this help\n\
     \x20 quit | q                   exit\n"
}
