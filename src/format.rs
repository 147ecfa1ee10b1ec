//! Text rendering for listings.

use crate::error::{SearchError, SearchResult};
use crate::models::ListingRecord;
use chrono::{DateTime, NaiveDate};

/// Two-digit year, month, day
pub const LIST_DATE_FORMAT: &str = "%y-%m-%d";

/// Parse an RFC 3339 timestamp into the calendar date it names
pub fn parse_list_date(raw: &str) -> SearchResult<NaiveDate> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.date_naive())
        .map_err(|source| SearchError::DateFormatFailed {
            value: raw.to_string(),
            source,
        })
}

/// Convert an RFC 3339 timestamp into `YY-MM-DD`
pub fn format_list_date(raw: &str) -> SearchResult<String> {
    parse_list_date(raw).map(|date| date.format(LIST_DATE_FORMAT).to_string())
}

/// Render one listing as a fixed multi-line block
pub fn format_listing(listing: &ListingRecord) -> String {
    let address = &listing.address;
    format!(
        "{}, {}, {}, {}\n\
         Link: {}\n\
         List Price: {}\n\
         List Date: {}\n\
         Status: {}\n\
         Price Reduced Amount: {}\n\
         Last Sold Price: {}\n\
         Sqft: {}\n\
         Beds: {}\n\
         Baths: {}\n",
        address.line,
        address.city,
        address.state_code,
        address.postal_code,
        listing.href,
        listing.list_price,
        listing.list_date.format(LIST_DATE_FORMAT),
        listing.status,
        listing.price_reduced_amount,
        listing.last_sold_price,
        listing.sqft,
        listing.beds,
        listing.baths,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Address;

    fn sample() -> ListingRecord {
        ListingRecord {
            address: Address {
                line: "3105 Lemmon Ave".to_string(),
                city: "Dallas".to_string(),
                state_code: "TX".to_string(),
                postal_code: "75204".to_string(),
            },
            href: "https://www.realtor.com/realestateandhomes-detail/3105-Lemmon-Ave".to_string(),
            list_price: 415_000,
            price_reduced_amount: 12_500,
            last_sold_price: 298_000,
            list_date: NaiveDate::from_ymd_opt(2023, 7, 4).unwrap(),
            status: "for_sale".to_string(),
            sqft: 1_640,
            beds: 3,
            baths: 2,
        }
    }

    #[test]
    fn formats_rfc3339_date_as_short_date() {
        assert_eq!(format_list_date("2023-07-04T00:00:00Z").unwrap(), "23-07-04");
    }

    #[test]
    fn keeps_date_in_the_timestamp_offset() {
        assert_eq!(
            format_list_date("2021-12-31T23:30:00.000000-06:00").unwrap(),
            "21-12-31"
        );
    }

    #[test]
    fn rejects_non_rfc3339_dates() {
        for raw in ["", "2023-07-04", "07/04/2023", "yesterday"] {
            match format_list_date(raw) {
                Err(SearchError::DateFormatFailed { value, .. }) => assert_eq!(value, raw),
                other => panic!("expected DateFormatFailed for {:?}, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn block_lists_fields_in_order() {
        let block = format_listing(&sample());
        let lines: Vec<&str> = block.lines().collect();

        assert_eq!(
            lines,
            vec![
                "3105 Lemmon Ave, Dallas, TX, 75204",
                "Link: https://www.realtor.com/realestateandhomes-detail/3105-Lemmon-Ave",
                "List Price: 415000",
                "List Date: 23-07-04",
                "Status: for_sale",
                "Price Reduced Amount: 12500",
                "Last Sold Price: 298000",
                "Sqft: 1640",
                "Beds: 3",
                "Baths: 2",
            ]
        );
        assert!(block.ends_with('\n'));
    }

    #[test]
    fn zero_valued_listing_still_renders() {
        let listing = ListingRecord {
            address: Address::default(),
            href: String::new(),
            list_price: 0,
            price_reduced_amount: 0,
            last_sold_price: 0,
            list_date: NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
            status: String::new(),
            sqft: 0,
            beds: 0,
            baths: 0,
        };

        let block = format_listing(&listing);
        assert!(block.starts_with(", , , \nLink: \n"));
        assert_eq!(block.lines().count(), 10);
    }

    #[test]
    fn formatting_is_idempotent() {
        let listing = sample();
        assert_eq!(format_listing(&listing), format_listing(&listing));
    }
}
