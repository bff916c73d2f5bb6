//! Transport seam between the register service and a Modbus client
//!
//! [`RegisterTransport`] is the narrow capability the service needs: six
//! already-decoded primitives bound to one device. Framing, CRC, timeouts and
//! retries live behind it.
//!
//! [`ClientTransport`] adapts any [`voltage_modbus::ModbusClient`] to this
//! trait. With the `rtu` feature, [`ClientTransport::open_serial`] opens a
//! serial RTU client from a [`SerialConfig`](crate::config::SerialConfig).

use std::future::Future;

use tracing::debug;
use voltage_modbus::{ModbusClient, SlaveId};

use crate::error::TransportError;

/// Decoded read/write primitives of one Modbus device.
///
/// Implementations report every failure (I/O, timeout, malformed or exception
/// response) as a [`TransportError`].
pub trait RegisterTransport: Send {
    /// FC01
    fn read_coils(
        &mut self,
        address: u16,
        quantity: u16,
    ) -> impl Future<Output = Result<Vec<bool>, TransportError>> + Send;

    /// FC02
    fn read_discrete_inputs(
        &mut self,
        address: u16,
        quantity: u16,
    ) -> impl Future<Output = Result<Vec<bool>, TransportError>> + Send;

    /// FC03
    fn read_holding_registers(
        &mut self,
        address: u16,
        quantity: u16,
    ) -> impl Future<Output = Result<Vec<u16>, TransportError>> + Send;

    /// FC04
    fn read_input_registers(
        &mut self,
        address: u16,
        quantity: u16,
    ) -> impl Future<Output = Result<Vec<u16>, TransportError>> + Send;

    /// FC15
    fn write_coils(
        &mut self,
        address: u16,
        values: &[bool],
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// FC16
    fn write_registers(
        &mut self,
        address: u16,
        values: &[u16],
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// [`RegisterTransport`] over a `voltage_modbus` client and a fixed unit id.
pub struct ClientTransport<C: ModbusClient> {
    client: C,
    slave_id: SlaveId,
}

impl<C: ModbusClient> ClientTransport<C> {
    pub fn new(client: C, slave_id: SlaveId) -> Self {
        Self { client, slave_id }
    }

    pub fn slave_id(&self) -> SlaveId {
        self.slave_id
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    /// Close the underlying client.
    pub async fn close(&mut self) -> Result<(), TransportError> {
        self.client.close().await.map_err(TransportError::from)
    }

    pub fn into_inner(self) -> C {
        self.client
    }
}

#[cfg(feature = "rtu")]
impl ClientTransport<voltage_modbus::ModbusRtuClient> {
    /// Open a serial RTU client.
    pub fn open_serial(
        config: &crate::config::SerialConfig,
        slave_id: SlaveId,
    ) -> crate::error::RegviewResult<Self> {
        use crate::config::Parity;
        use std::time::Duration;

        let data_bits = match config.data_bits {
            5 => tokio_serial::DataBits::Five,
            6 => tokio_serial::DataBits::Six,
            7 => tokio_serial::DataBits::Seven,
            _ => tokio_serial::DataBits::Eight,
        };
        let stop_bits = match config.stop_bits {
            2 => tokio_serial::StopBits::Two,
            _ => tokio_serial::StopBits::One,
        };
        let parity = match config.parity {
            Parity::None => tokio_serial::Parity::None,
            Parity::Odd => tokio_serial::Parity::Odd,
            Parity::Even => tokio_serial::Parity::Even,
        };

        debug!(
            "Opening {} at {} baud ({} data bits, {:?} parity, {} stop bits)",
            config.port, config.baud_rate, config.data_bits, config.parity, config.stop_bits
        );

        let client = voltage_modbus::ModbusRtuClient::with_config_and_logging(
            &config.port,
            config.baud_rate,
            data_bits,
            stop_bits,
            parity,
            Duration::from_millis(config.timeout_ms),
            None,
        )
        .map_err(TransportError::from)?;

        Ok(Self::new(client, slave_id))
    }
}

impl<C: ModbusClient> RegisterTransport for ClientTransport<C> {
    async fn read_coils(
        &mut self,
        address: u16,
        quantity: u16,
    ) -> Result<Vec<bool>, TransportError> {
        debug!("FC01 slave={} address={} quantity={}", self.slave_id, address, quantity);
        Ok(self.client.read_01(self.slave_id, address, quantity).await?)
    }

    async fn read_discrete_inputs(
        &mut self,
        address: u16,
        quantity: u16,
    ) -> Result<Vec<bool>, TransportError> {
        debug!("FC02 slave={} address={} quantity={}", self.slave_id, address, quantity);
        Ok(self.client.read_02(self.slave_id, address, quantity).await?)
    }

    async fn read_holding_registers(
        &mut self,
        address: u16,
        quantity: u16,
    ) -> Result<Vec<u16>, TransportError> {
        debug!("FC03 slave={} address={} quantity={}", self.slave_id, address, quantity);
        Ok(self.client.read_03(self.slave_id, address, quantity).await?)
    }

    async fn read_input_registers(
        &mut self,
        address: u16,
        quantity: u16,
    ) -> Result<Vec<u16>, TransportError> {
        debug!("FC04 slave={} address={} quantity={}", self.slave_id, address, quantity);
        Ok(self.client.read_04(self.slave_id, address, quantity).await?)
    }

    async fn write_coils(&mut self, address: u16, values: &[bool]) -> Result<(), TransportError> {
        debug!("FC15 slave={} address={} count={}", self.slave_id, address, values.len());
        Ok(self.client.write_0f(self.slave_id, address, values).await?)
    }

    async fn write_registers(
        &mut self,
        address: u16,
        values: &[u16],
    ) -> Result<(), TransportError> {
        debug!("FC16 slave={} address={} count={}", self.slave_id, address, values.len());
        Ok(self.client.write_10(self.slave_id, address, values).await?)
    }
}
