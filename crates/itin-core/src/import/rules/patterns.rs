//! Common regex patterns for booking confirmation extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// English month names, full or abbreviated.
const MONTH: &str = r"Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?";

/// Cities whose airport code may be printed next to the name.
const CITY: &str = r"zurich|zürich|geneva|genève|basel|lugano|bern|london|paris|frankfurt|munich|münchen|vienna|wien|rome|milan|venice|florence|barcelona|madrid|lisbon|porto|amsterdam|brussels|berlin|hamburg|düsseldorf|prague|budapest|warsaw|copenhagen|stockholm|oslo|helsinki|athens|nice|dublin|edinburgh|manchester|new york|newark|boston|chicago|miami|san francisco|los angeles|washington|montreal|toronto|tel aviv|dubai|singapore|tokyo|bangkok|mumbai|delhi|johannesburg|cairo|sao paulo|são paulo";

/// Currency symbol or code printed next to an amount.
const CURRENCY: &str = r"(?:US\$|\$|€|£|USD|EUR|CHF|GBP)";

/// Amount with optional thousands separators and cents.
const AMOUNT: &str = r"\d[\d,]*(?:\.\d{1,2})?";

lazy_static! {
    // Shared normalizer patterns
    pub static ref TIME_12H: Regex = Regex::new(
        r"(?i)\b(\d{1,2}):(\d{2})\s*([ap])\.?m\b\.?"
    ).unwrap();

    /// `[Weekday,] Month Day[,] Year` or `[Weekday] Day Month Year`.
    /// Groups: 1 month + 2 day, or 3 day + 4 month; 5 year.
    pub static ref DATE_PHRASE: Regex = Regex::new(&format!(
        r"(?i)(?:\b(?:mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?,?\s+)?(?:\b({MONTH})\b\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?|\b(\d{{1,2}})(?:st|nd|rd|th)?\.?\s+({MONTH})\b\.?),?\s+(\d{{4}})\b"
    )).unwrap();

    pub static ref DATE_ISO: Regex = Regex::new(
        r"\b(\d{4})-(\d{2})-(\d{2})\b"
    ).unwrap();

    pub static ref YEAR_20XX: Regex = Regex::new(
        r"\b(20\d{2})\b"
    ).unwrap();

    // United-style itineraries
    pub static ref UNITED_FINGERPRINT: Regex = Regex::new(
        r"(?i)\bunited\.com\b|\bMileagePlus\b"
    ).unwrap();

    pub static ref UNITED_SEGMENT: Regex = Regex::new(
        r"\bFlight\s+(\d+)\s+of\s+(\d+)\s+([A-Z0-9]{2})\s?(\d{1,4})\b"
    ).unwrap();

    pub static ref UNITED_DATE: Regex = Regex::new(
        r"\b(?:Mon|Tue|Wed|Thu|Fri|Sat|Sun)[a-z]*,?\s+([A-Z][a-z]{2})[a-z]*\.?\s+(\d{1,2}),?\s+(\d{4})\b"
    ).unwrap();

    pub static ref AIRPORT_CODE_PAREN: Regex = Regex::new(
        r"\(([A-Z]{3})\)"
    ).unwrap();

    pub static ref UNITED_CONFIRMATION: Regex = Regex::new(
        r"(?i:confirmation\s+(?:number|code|#)|confirmation)[ \t]*:?[ \t]*([A-Z0-9]{6})\b"
    ).unwrap();

    pub static ref CONFIRMATION_LABEL_LINE: Regex = Regex::new(
        r"(?i)^confirmation\s*(?:number|code|#)?\s*:?$"
    ).unwrap();

    pub static ref UNITED_TOTAL: Regex = Regex::new(&format!(
        r"(?i)\btotal\b:?[^\n]*?({AMOUNT})\s*USD\b"
    )).unwrap();

    // SWISS-style confirmations
    pub static ref SWISS_FINGERPRINT: Regex = Regex::new(
        r"\bLX\s?\d{2,4}\b"
    ).unwrap();

    pub static ref SWISS_FLIGHT: Regex = Regex::new(
        r"\bLX\s?(\d{1,4})\b"
    ).unwrap();

    pub static ref SWISS_DATETIME: Regex = Regex::new(
        r"\b(\d{2})\.(\d{2})\.(\d{4})\s*[-–]\s*(\d{2}):(\d{2})\b"
    ).unwrap();

    pub static ref SWISS_ROUTE: Regex = Regex::new(
        r"\b([A-Z]{3})\s*(?:-|–|→|>|to)\s*([A-Z]{3})\b"
    ).unwrap();

    pub static ref SWISS_CITY_CODE: Regex = Regex::new(&format!(
        r"(?i:\b(?:{CITY})\b)[ \t]*[(,\-–]?[ \t]*([A-Z]{{3}})\b"
    )).unwrap();

    pub static ref SWISS_CODE_CITY: Regex = Regex::new(&format!(
        r"\b([A-Z]{{3}})\b\)?[ \t]*[,\-–]?[ \t]*(?i:\b(?:{CITY})\b)"
    )).unwrap();

    pub static ref SWISS_BOOKING_REFERENCE: Regex = Regex::new(
        r"(?i:booking\s+reference|booking\s+code|reservation\s+code|pnr)\s*:?\s*([A-Z0-9]{6})\b"
    ).unwrap();

    pub static ref SWISS_TOTAL_USD: Regex = Regex::new(&format!(
        r"(?i)\btotal\b[^\n]*?(?:\bUSD\s*({AMOUNT})|({AMOUNT})\s*USD\b)"
    )).unwrap();

    pub static ref SWISS_TOTAL_CHF: Regex = Regex::new(&format!(
        r"(?i)\btotal\b[^\n]*?(?:\bCHF\s*({AMOUNT})|({AMOUNT})\s*CHF\b)"
    )).unwrap();

    // FlixBus confirmations
    pub static ref FLIXBUS_FINGERPRINT: Regex = Regex::new(
        r"(?i)\bflix\s?bus\b|\bflix\s?train\b|global\.flixbus\.com"
    ).unwrap();

    pub static ref FLIXBUS_BOOKING_NUMBER: Regex = Regex::new(
        r"(?i:booking\s*(?:number|no\.?|nr\.?|#))\s*:?\s*#?\s*(\d{6,})"
    ).unwrap();

    pub static ref FLIXBUS_DATETIME: Regex = Regex::new(
        r"\b(\d{1,2})/(\d{1,2})/(\d{4}),?\s*(\d{1,2}:\d{2}\s*[AaPp]\.?[Mm]\b)"
    ).unwrap();

    /// Amount next to a currency mark, or alone at the end of the line.
    /// A number followed by `%` is a tax rate and never matches.
    pub static ref FLIXBUS_TOTAL: Regex = Regex::new(&format!(
        r"(?im)\btotal\b[^\n]{{0,30}}?(?:{CURRENCY}[ \t]*({AMOUNT})|({AMOUNT})[ \t]*{CURRENCY}|({AMOUNT})[ \t]*$)"
    )).unwrap();

    pub static ref FLIXBUS_LINE: Regex = Regex::new(
        r"(?i)\b(?:line|bus)\s*(?:no\.?|number|#)?\s*:?\s*(N?\d{2,5})\b"
    ).unwrap();

    pub static ref FLIXBUS_SEAT: Regex = Regex::new(
        r"(?i)\bseat\s*(?:no\.?|number)?\s*:?\s*(\d{1,3}[A-Z]?)\b"
    ).unwrap();

    // Priceline car rental receipts
    pub static ref PRICELINE_FINGERPRINT: Regex = Regex::new(
        r"(?i)\bpriceline\b"
    ).unwrap();

    pub static ref PRICELINE_CONFIRMATION: Regex = Regex::new(
        r"(?i:confirmation\s*(?:number|no\.?|#))\s*:?\s*([A-Z0-9][A-Z0-9-]{4,})"
    ).unwrap();

    pub static ref PRICELINE_TRIP_NUMBER: Regex = Regex::new(
        r"(?i:trip\s*(?:number|no\.?|#))\s*:?\s*(\d[\d-]{4,})"
    ).unwrap();

    pub static ref PRICELINE_CAR_CLASS: Regex = Regex::new(
        r"(?i)\b(compact|economy|mid-?size|standard|full-?size|suv|minivan|luxury|premium)\b"
    ).unwrap();

    /// `Jul 20 - Jul 24 • Pick-up: 10:00 AM`
    pub static ref PRICELINE_RANGE: Regex = Regex::new(
        r"\b([A-Z][a-z]{2})[a-z]*\.?\s+(\d{1,2})\s*[-–]\s*([A-Z][a-z]{2})[a-z]*\.?\s+(\d{1,2})\s*[•·|]?\s*(?i:pick-?\s?up)\s*:?\s*(\d{1,2}:\d{2}\s*[AaPp]\.?[Mm]\b)"
    ).unwrap();

    pub static ref PRICELINE_TOTAL: Regex = Regex::new(&format!(
        r"(?i)\btotal(?:\s+(?:cost|price|charges))?\b[^\n$]{{0,30}}\$\s*({AMOUNT})"
    )).unwrap();

    // Booking.com-style lodging confirmations
    pub static ref BOOKING_FINGERPRINT: Regex = Regex::new(
        r"(?i)\bcheck[\s-]?in\b"
    ).unwrap();

    pub static ref LODGING_BOOKED_AT: Regex = Regex::new(
        r"(?im)(?:your\s+booking\s+at|confirmed\s+at)\s+([^\n]+?)(?:\.(?:\s|$)|$)"
    ).unwrap();

    pub static ref ADDRESS_LABEL: Regex = Regex::new(
        r"(?i)\baddress\s*:"
    ).unwrap();

    /// A line that opens a new `Label:` field.
    pub static ref LABELED_LINE: Regex = Regex::new(
        r"^[A-Za-z][A-Za-z .'-]{0,30}:(?:\s|$)"
    ).unwrap();

    pub static ref PROPERTY_GENERIC: Regex = Regex::new(
        r"\b(?:Apartment|Hotel|Resort|Villa|Chalet)s?[ \t]+[A-Z][\w'&.-]*(?:[ \t]+[A-Z][\w'&.-]*){0,4}"
    ).unwrap();

    pub static ref CHECK_ANCHOR: Regex = Regex::new(
        r"(?i)\bcheck[\s-]?(in|out)\b"
    ).unwrap();

    /// Day and month split across lines by PDF extraction.
    pub static ref VERTICAL_DATE: Regex = Regex::new(&format!(
        r"(?i)\b(\d{{1,2}})\s+({MONTH})\b"
    )).unwrap();

    pub static ref LODGING_CONFIRMATION: Regex = Regex::new(
        r"(?i:confirmation\s+number|booking\s+reference|booking\s+number|confirmation)\s*:?\s*(\d[\d.]{4,}\d)"
    ).unwrap();

    pub static ref LODGING_PRICE_ANCHOR: Regex = Regex::new(
        r"(?i)\b(?:final\s+price|total\s+price|total\s+amount)\b"
    ).unwrap();

    /// Currency-prefixed amount, optionally qualified with "approx.".
    pub static ref PRICE_AMOUNT: Regex = Regex::new(&format!(
        r"(?i)(?:approx\.?\s*)?(US\$|\$|€|£|USD|EUR|CHF|GBP)\s*({AMOUNT})"
    )).unwrap();

    pub static ref LODGING_PRICE_FALLBACK: Regex = Regex::new(&format!(
        r"(?i)\b(?:total|price)\b[^\n]{{0,40}}?(US\$|\$|€|£|USD|EUR|CHF|GBP)\s*({AMOUNT})"
    )).unwrap();
}
