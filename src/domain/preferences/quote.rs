use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DailyQuote {
    pub text: &'static str,
    pub author: &'static str,
}

pub const QUOTES: &[DailyQuote] = &[
    DailyQuote {
        text: "कर्म करो, फल की चिंता मत करो।",
        author: "भगवद् गीता",
    },
    DailyQuote {
        text: "सेवा परमो धर्मः।",
        author: "संस्कृत सूक्ति",
    },
    DailyQuote {
        text: "जहाँ चाह, वहाँ राह।",
        author: "लोकोक्ति",
    },
    DailyQuote {
        text: "मन के हारे हार है, मन के जीते जीत।",
        author: "कबीर",
    },
    DailyQuote {
        text: "धीरे-धीरे रे मना, धीरे सब कुछ होय।",
        author: "कबीर",
    },
    DailyQuote {
        text: "सत्य ही ईश्वर है।",
        author: "महात्मा गांधी",
    },
    DailyQuote {
        text: "उठो, जागो और तब तक मत रुको जब तक लक्ष्य प्राप्त न हो जाए।",
        author: "स्वामी विवेकानंद",
    },
];

/// The quote shown on a given day: `day_of_month % QUOTES.len()`.
pub fn quote_for_day(date: NaiveDate) -> DailyQuote {
    QUOTES[date.day() as usize % QUOTES.len()]
}
