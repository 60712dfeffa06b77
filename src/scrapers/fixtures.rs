//! HTML shaped like the Booking.com results markup, for tests.

pub(crate) struct CardFixture {
    title: Option<String>,
    price: Option<String>,
    reviews: Option<(String, String, String)>,
}

impl CardFixture {
    pub(crate) fn complete(title: &str, price: &str, score: &str, avg_review: &str, reviews_count: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            price: Some(price.to_string()),
            reviews: Some((score.to_string(), avg_review.to_string(), reviews_count.to_string())),
        }
    }

    pub(crate) fn without_title(mut self) -> Self {
        self.title = None;
        self
    }

    pub(crate) fn without_price(mut self) -> Self {
        self.price = None;
        self
    }

    pub(crate) fn without_reviews(mut self) -> Self {
        self.reviews = None;
        self
    }
}

pub(crate) fn card(fixture: CardFixture) -> String {
    let mut html = String::from(r#"<div data-testid="property-card"><div class="c-body">"#);

    if let Some(title) = fixture.title {
        html.push_str(&format!(
            r#"<h3><a href="/hotel/x.html"><div data-testid="title" class="t">{title}</div></a></h3>"#
        ));
    }

    if let Some((score, avg_review, reviews_count)) = fixture.reviews {
        html.push_str(&format!(
            r#"<a><div data-testid="review-score"><div class="s" aria-hidden="true">{score}</div><div class="w"><div class="a">{avg_review}</div><div class="n">{reviews_count}</div></div></div></a>"#
        ));
    }

    html.push_str(r#"<div data-testid="availability-rate-information">"#);
    if let Some(price) = fixture.price {
        html.push_str(&format!(
            r#"<span data-testid="price-and-discounted-price" class="p">{price}</span>"#
        ));
    }
    html.push_str("</div></div></div>");

    html
}

pub(crate) fn results_page(cards: &[String]) -> String {
    format!(
        r#"<!DOCTYPE html><html lang="en-us"><head><title>Results</title></head><body><div id="results"><h1>Paris: properties found</h1>{}</div></body></html>"#,
        cards.concat()
    )
}
