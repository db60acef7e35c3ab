use sdk::cosmwasm_std::{Addr, BlockInfo, Coin, Event, Timestamp};

pub trait Emit
where
    Self: Sized,
{
    fn emit<K, V>(self, event_key: K, event_value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>;

    /// Specialization of [`emit`](Self::emit) for [`Timestamp`].
    fn emit_timestamp<K>(self, event_key: K, timestamp: &Timestamp) -> Self
    where
        K: Into<String>,
    {
        self.emit_to_string_value(event_key, timestamp.nanos())
    }

    /// Specialization of [`emit`](Self::emit) for values implementing [`ToString`].
    fn emit_to_string_value<K, V>(self, event_key: K, value: V) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        self.emit(event_key, value.to_string())
    }

    fn emit_addr<K>(self, event_key: K, addr: &Addr) -> Self
    where
        K: Into<String>,
    {
        self.emit(event_key, addr.as_str())
    }

    /// Emits the amount and the denomination under `<key>-amount` and `<key>-denom`
    fn emit_coin<K>(self, event_key: K, coin: &Coin) -> Self
    where
        K: Into<String>,
    {
        let key = event_key.into();
        let amount_key = key.clone() + "-amount";
        let denom_key = key + "-denom";

        self.emit_to_string_value(amount_key, coin.amount)
            .emit(denom_key, coin.denom.as_str())
    }

    fn emit_tx_info(self, block: &BlockInfo) -> Self {
        self.emit_to_string_value("height", block.height)
            .emit_timestamp("at", &block.time)
    }
}

pub struct Emitter {
    event: Event,
}

impl Emitter {
    pub fn of_type<T>(event_type: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            event: Event::new(event_type.into()),
        }
    }
}

impl From<Emitter> for Event {
    fn from(emitter: Emitter) -> Self {
        emitter.event
    }
}

impl Emit for Emitter {
    fn emit<K, V>(mut self, event_key: K, event_value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.event = self.event.add_attribute(event_key, event_value);

        self
    }
}
