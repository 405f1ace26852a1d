use maud::{DOCTYPE, Markup, PreEscaped, html};

/// The currency glyph placed in front of every formatted amount.
pub const CURRENCY_SYMBOL: &str = "₹";

const ECHARTS_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@5.5.1/dist/echarts.min.js";
const TAILWIND_SCRIPT_URL: &str = "https://cdn.tailwindcss.com";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500 \
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline bg-transparent \
    border-none cursor-pointer disabled:no-underline disabled:cursor-not-allowed \
    disabled:text-gray-400";

// Form styles
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

/// The HTML document shell. `scripts` are inline JavaScript sources placed in
/// the head after the Tailwind and ECharts libraries.
pub fn base(title: &str, scripts: &[PreEscaped<String>], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Budget Tracker" }

                script src=(TAILWIND_SCRIPT_URL) {}
                script src=(ECHARTS_SCRIPT_URL) {}

                @for source in scripts
                {
                    script { (source) }
                }
            }

            body class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)
            }
        }
    }
}

/// Formats `number` with thousands separators, two decimal places and the
/// [CURRENCY_SYMBOL] prefix, e.g. `₹1,234.50` or `₹-50.00`.
///
/// Amounts that round to zero are shown unsigned. Non-finite numbers fall
/// back to the float display, e.g. `₹NaN`.
pub fn format_currency(number: f64) -> String {
    if !number.is_finite() {
        return format!("{CURRENCY_SYMBOL}{number}");
    }

    let cents = (number.abs() * 100.0).round();
    let digits = if cents.is_finite() {
        format!("{cents:03.0}")
    } else {
        format!("{:.0}00", number.abs())
    };
    let (whole, fraction) = digits.split_at(digits.len() - 2);
    let sign = if number < 0.0 && cents > 0.0 { "-" } else { "" };

    format!("{CURRENCY_SYMBOL}{sign}{}.{fraction}", group_digits(whole))
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index != 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use maud::html;
    use scraper::{Html, Selector};

    use super::{base, format_currency};

    #[test]
    fn formats_zero() {
        assert_eq!(format_currency(0.0), "₹0.00");
    }

    #[test]
    fn formats_thousands_with_separator() {
        assert_eq!(format_currency(1234.5), "₹1,234.50");
    }

    #[test]
    fn formats_negative_with_sign_after_symbol() {
        assert_eq!(format_currency(-1234.25), "₹-1,234.25");
    }

    #[test]
    fn passes_nan_through() {
        assert_eq!(format_currency(f64::NAN), "₹NaN");
    }

    #[test]
    fn pads_missing_decimals() {
        assert_eq!(format_currency(100.0), "₹100.00");
        assert_eq!(format_currency(12.3), "₹12.30");
        assert_eq!(format_currency(0.4), "₹0.40");
    }

    #[test]
    fn groups_every_digit_of_large_amounts() {
        assert_eq!(format_currency(1e12), "₹1,000,000,000,000.00");
        assert_eq!(format_currency(-1234567.891), "₹-1,234,567.89");
    }

    #[test]
    fn rounding_carries_into_the_whole_part() {
        assert_eq!(format_currency(999.999), "₹1,000.00");
    }

    #[test]
    fn amounts_that_round_to_zero_are_unsigned() {
        assert_eq!(format_currency(0.004), "₹0.00");
        assert_eq!(format_currency(0.1 + 0.2 - 0.3), "₹0.00");
        assert_eq!(format_currency(-0.001), "₹0.00");
        assert_eq!(format_currency(-0.0), "₹0.00");
    }

    #[test]
    fn base_sets_title_and_content() {
        let page = base("Dashboard", &[], &html!(p id="content" { "hello" })).into_string();

        let document = Html::parse_document(&page);
        let title = document
            .select(&Selector::parse("title").unwrap())
            .next()
            .unwrap();
        assert_eq!(title.text().collect::<String>(), "Dashboard - Budget Tracker");
        assert_eq!(
            document
                .select(&Selector::parse("#content").unwrap())
                .count(),
            1
        );
    }

    #[test]
    fn base_loads_stylesheet_and_chart_libraries_before_inline_scripts() {
        let page = base(
            "Dashboard",
            &[maud::PreEscaped("init();".to_owned())],
            &html!(p { "hello" }),
        )
        .into_string();

        let document = Html::parse_document(&page);
        let scripts: Vec<_> = document
            .select(&Selector::parse("head script").unwrap())
            .collect();
        assert_eq!(scripts.len(), 3);
        assert_eq!(scripts[0].value().attr("src"), Some("https://cdn.tailwindcss.com"));
        assert!(scripts[1].value().attr("src").unwrap().contains("echarts"));
        assert_eq!(scripts[2].text().collect::<String>(), "init();");
    }
}
