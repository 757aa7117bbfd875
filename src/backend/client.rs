use super::mathphysics::{Meter, Point2D};
use super::station::BaseStationId;


pub type ClientId = usize;
pub type SliceIndex = usize;


pub const IOT_SLICE_NAME: &str  = "iot";
pub const DATA_SLICE_NAME: &str = "data";


/// Named service class a client subscribes to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slice {
    name: String,
}

impl Slice {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}


#[derive(Clone, Debug)]
pub struct ClientBuilder {
    pk: ClientId,
    position: Option<Point2D>,
    subscribed_slice_index: Option<SliceIndex>,
    slice: Option<Slice>,
    base_station: Option<BaseStationId>,
    total_connected_time: Option<f64>,
    total_consume_time: Option<f64>,
}

impl ClientBuilder {
    #[must_use]
    pub fn new(pk: ClientId) -> Self {
        Self {
            pk,
            position: None,
            subscribed_slice_index: None,
            slice: None,
            base_station: None,
            total_connected_time: None,
            total_consume_time: None,
        }
    }

    #[must_use]
    pub fn set_position(mut self, position: Point2D) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn set_slice(
        mut self, 
        subscribed_slice_index: SliceIndex, 
        slice: Slice
    ) -> Self {
        self.subscribed_slice_index = Some(subscribed_slice_index);
        self.slice = Some(slice);
        self
    }
    
    #[must_use]
    pub fn set_subscribed_slice_index(
        mut self, 
        subscribed_slice_index: SliceIndex
    ) -> Self {
        self.subscribed_slice_index = Some(subscribed_slice_index);
        self
    }

    #[must_use]
    pub fn set_base_station(mut self, base_station: BaseStationId) -> Self {
        self.base_station = Some(base_station);
        self
    }

    #[must_use]
    pub fn set_times(
        mut self, 
        total_connected_time: f64, 
        total_consume_time: f64
    ) -> Self {
        self.total_connected_time = Some(total_connected_time);
        self.total_consume_time   = Some(total_consume_time);
        self
    }

    #[must_use]
    pub fn build(self) -> Client {
        Client {
            pk: self.pk,
            position: self.position.unwrap_or_default(),
            subscribed_slice_index: self.subscribed_slice_index
                .unwrap_or_default(),
            slice: self.slice,
            base_station: self.base_station,
            total_connected_time: self.total_connected_time
                .unwrap_or_default(),
            total_consume_time: self.total_consume_time.unwrap_or_default(),
        }
    }
}


#[derive(Clone, Debug)]
pub struct Client {
    pk: ClientId,
    position: Point2D,
    subscribed_slice_index: SliceIndex,
    slice: Option<Slice>,
    base_station: Option<BaseStationId>,
    total_connected_time: f64,
    total_consume_time: f64,
}

impl Client {
    #[must_use]
    pub fn pk(&self) -> ClientId {
        self.pk
    }

    #[must_use]
    pub fn position(&self) -> Point2D {
        self.position
    }

    #[must_use]
    pub fn x(&self) -> Meter {
        self.position.x
    }
    
    #[must_use]
    pub fn y(&self) -> Meter {
        self.position.y
    }

    #[must_use]
    pub fn subscribed_slice_index(&self) -> SliceIndex {
        self.subscribed_slice_index
    }

    #[must_use]
    pub fn slice(&self) -> Option<&Slice> {
        self.slice.as_ref()
    }

    #[must_use]
    pub fn base_station(&self) -> Option<BaseStationId> {
        self.base_station
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.base_station.is_some()
    }

    #[must_use]
    pub fn total_connected_time(&self) -> f64 {
        self.total_connected_time
    }
    
    #[must_use]
    pub fn total_consume_time(&self) -> f64 {
        self.total_consume_time
    }

    pub fn set_position(&mut self, position: Point2D) {
        self.position = position;
    }

    pub fn connect(&mut self, base_station: BaseStationId) {
        self.base_station = Some(base_station);
    }

    pub fn disconnect(&mut self) {
        self.base_station = None;
    }
}
