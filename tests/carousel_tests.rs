use cafe_site::carousel::{Autoplay, Carousel, CarouselError, Direction, Lightbox, SharedCarousel};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

fn three() -> Carousel<&'static str> {
    Carousel::new(vec!["Aloo Samosa", "Chicken Samosa", "Paneer Patties"]).unwrap()
}

fn shared(carousel: Carousel<&'static str>) -> SharedCarousel<&'static str> {
    Arc::new(Mutex::new(carousel))
}

fn index_of(carousel: &SharedCarousel<&'static str>) -> usize {
    carousel.lock().unwrap().index()
}

// --- Stepping ---

#[test]
fn test_empty_carousel_is_rejected() {
    let result = Carousel::<&str>::new(Vec::new());
    assert_eq!(result.unwrap_err(), CarouselError::Empty);
}

#[test]
fn test_next_visits_in_order_and_wraps() {
    let mut carousel = three();
    let visited: Vec<usize> = (0..3).map(|_| carousel.next()).collect();

    assert_eq!(visited, vec![1, 2, 0]);
    assert_eq!(*carousel.current(), "Aloo Samosa");
}

#[test]
fn test_prev_from_first_wraps_to_last() {
    let mut carousel = three();
    assert_eq!(carousel.prev(), 2);
    assert_eq!(*carousel.current(), "Paneer Patties");
}

#[test]
fn test_n_steps_return_to_start_and_prev_undoes_next() {
    for len in 1..=5 {
        let mut carousel = Carousel::new((0..len).collect::<Vec<_>>()).unwrap();
        carousel.select_index(len / 2);
        let start = carousel.index();

        for _ in 0..len {
            carousel.advance(Direction::Next);
        }
        assert_eq!(carousel.index(), start);

        carousel.next();
        carousel.prev();
        assert_eq!(carousel.index(), start);

        carousel.prev();
        carousel.next();
        assert_eq!(carousel.index(), start);
    }
}

#[test]
fn test_single_item_carousel_stays_put() {
    let mut carousel = Carousel::new(vec!["only"]).unwrap();
    assert_eq!(carousel.next(), 0);
    assert_eq!(carousel.prev(), 0);
}

#[test]
fn test_select_index_clamps_past_the_end() {
    let mut carousel = three();

    assert_eq!(carousel.select_index(1), 1);
    assert_eq!(carousel.select_index(99), 2);
    assert_eq!(carousel.index(), 2);
    assert!(carousel.index() < carousel.len());
}

// --- Autoplay ---

#[tokio::test(start_paused = true)]
async fn test_autoplay_advances_once_per_period() {
    let carousel = shared(three());
    let _handle = Autoplay::spawn(carousel.clone(), Duration::from_millis(5000));

    tokio::time::sleep(Duration::from_millis(4900)).await;
    assert_eq!(index_of(&carousel), 0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(index_of(&carousel), 1);

    tokio::time::sleep(Duration::from_millis(10_000)).await;
    assert_eq!(index_of(&carousel), 0);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_stops_autoplay() {
    let carousel = shared(three());
    let handle = Autoplay::spawn(carousel.clone(), Duration::from_millis(5000));
    assert!(handle.is_running());

    tokio::time::sleep(Duration::from_millis(5100)).await;
    assert_eq!(index_of(&carousel), 1);

    handle.stop();
    tokio::time::sleep(Duration::from_millis(60_000)).await;

    assert_eq!(index_of(&carousel), 1);
}

#[tokio::test(start_paused = true)]
async fn test_manual_navigation_during_autoplay_keeps_index_in_range() {
    let carousel = shared(three());
    let _handle = Autoplay::spawn(carousel.clone(), Duration::from_millis(5000));

    carousel.lock().unwrap().select_index(2);
    tokio::time::sleep(Duration::from_millis(5100)).await;

    assert_eq!(index_of(&carousel), 0);
}

// --- Lightbox ---

#[test]
fn test_lightbox_open_and_close() {
    let mut lightbox = Lightbox::default();
    assert!(!lightbox.is_open());
    assert_eq!(lightbox.selected(), None);

    lightbox.open("Cozy Interior");
    assert!(lightbox.is_open());
    assert_eq!(lightbox.selected(), Some(&"Cozy Interior"));

    lightbox.open("Barista at Work");
    assert_eq!(lightbox.selected(), Some(&"Barista at Work"));

    lightbox.close();
    lightbox.close();
    assert_eq!(lightbox, Lightbox::Closed);
}
