use arp_packets::MacAddr;
use arp_resolver::config::ArpConfig;
use clap::{App, Arg, ArgMatches};
use failure::Fail;
use std::net::Ipv4Addr;
use std::time::Duration;

#[derive(Debug, Fail)]
pub enum ConfigError {
    #[fail(display = "invalid MAC address {:?}: {}", _0, _1)]
    InvalidMac(String, &'static str),
    #[fail(display = "invalid IPv4 address {:?} for --{}", _0, _1)]
    InvalidIpv4(String, &'static str),
    #[fail(display = "invalid number {:?} for --{}", _0, _1)]
    InvalidNumber(String, &'static str),
    #[fail(display = "{}", _0)]
    Args(String),
}

/// Everything the demo needs to set up its two hosts.
#[derive(Debug)]
pub struct LanConfig {
    pub host: ArpConfig,
    pub peer: ArpConfig,
    pub aging_period: Duration,
    pub rounds: usize,
    pub verbose: bool,
}

pub fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("ARP LAN")
        .version("0.1")
        .author("Route-rs Contributors")
        .about("Resolves and delivers datagrams between two simulated hosts on one segment")
        .arg(ipv4_arg("ip", "192.168.7.1", "IPv4 address of the sending host"))
        .arg(mac_arg("mac", "02:aa:00:00:00:01", "MAC address of the sending host"))
        .arg(ipv4_arg("peer-ip", "192.168.7.2", "IPv4 address of the receiving host"))
        .arg(mac_arg("peer-mac", "02:bb:00:00:00:02", "MAC address of the receiving host"))
        .arg(ipv4_arg("netmask", "255.255.255.0", "Netmask shared by both hosts"))
        .arg(
            Arg::with_name("router")
                .long("router")
                .value_name("IPV4")
                .help("Default router for off-link destinations")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("aging-period-ms")
                .long("aging-period-ms")
                .value_name("MILLIS")
                .help("Period of the ARP aging timer")
                .default_value("10000")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("rounds")
                .long("rounds")
                .value_name("N")
                .help("Datagrams the sending host transmits")
                .default_value("3")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log every resolution decision"),
        )
}

fn ipv4_arg<'a, 'b>(name: &'a str, default: &'a str, help: &'a str) -> Arg<'a, 'b> {
    Arg::with_name(name)
        .long(name)
        .value_name("IPV4")
        .help(help)
        .default_value(default)
        .takes_value(true)
}

fn mac_arg<'a, 'b>(name: &'a str, default: &'a str, help: &'a str) -> Arg<'a, 'b> {
    Arg::with_name(name)
        .long(name)
        .value_name("MAC")
        .help(help)
        .default_value(default)
        .takes_value(true)
}

impl LanConfig {
    pub fn from_args() -> Result<LanConfig, ConfigError> {
        LanConfig::from_matches(&app().get_matches())
    }

    pub fn from_iter<I, T>(args: I) -> Result<LanConfig, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = app()
            .get_matches_from_safe(args)
            .map_err(|err| ConfigError::Args(err.message))?;
        LanConfig::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<LanConfig, ConfigError> {
        let netmask = parse_ipv4(matches, "netmask")?;

        let mut host = ArpConfig::new(parse_mac(matches, "mac")?, parse_ipv4(matches, "ip")?)
            .with_netmask(netmask);
        let peer = ArpConfig::new(
            parse_mac(matches, "peer-mac")?,
            parse_ipv4(matches, "peer-ip")?,
        )
        .with_netmask(netmask);
        if matches.is_present("router") {
            host = host.with_default_router(parse_ipv4(matches, "router")?);
        }

        Ok(LanConfig {
            host,
            peer,
            aging_period: Duration::from_millis(parse_number(matches, "aging-period-ms")?),
            rounds: parse_number(matches, "rounds")? as usize,
            verbose: matches.is_present("verbose"),
        })
    }
}

fn parse_ipv4(matches: &ArgMatches, name: &'static str) -> Result<Ipv4Addr, ConfigError> {
    let value = matches.value_of(name).unwrap_or_default();
    value
        .parse()
        .map_err(|_| ConfigError::InvalidIpv4(value.to_string(), name))
}

fn parse_mac(matches: &ArgMatches, name: &'static str) -> Result<MacAddr, ConfigError> {
    let value = matches.value_of(name).unwrap_or_default();
    value
        .parse()
        .map_err(|err| ConfigError::InvalidMac(value.to_string(), err))
}

fn parse_number(matches: &ArgMatches, name: &'static str) -> Result<u64, ConfigError> {
    let value = matches.value_of(name).unwrap_or_default();
    match value.parse() {
        Ok(0) | Err(_) => Err(ConfigError::InvalidNumber(value.to_string(), name)),
        Ok(number) => Ok(number),
    }
}
